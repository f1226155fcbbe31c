//! Brand-specific model grouping.
//!
//! A model group buckets related model names (every BMW 3xx is a "3 Series")
//! so a buyer can filter by family instead of picking one exact model. The
//! group is derived from `(brand, model)` on demand; nothing is stored.
//!
//! Each brand with special rules has one entry in [`GROUP_RULES`]. Brands
//! without an entry group by the first word of the model name.

use super::brands::find_brand;

/// Group assigned when no rule produces a name.
pub const OTHER_GROUP: &str = "Other";

/// Prefix that marks a model selector value as a group rather than a model.
pub const GROUP_SELECTOR_PREFIX: &str = "group:";

type GroupRule = fn(&str) -> Option<String>;

/// Brand → grouping rule.
static GROUP_RULES: &[(&str, GroupRule)] = &[
    ("BMW", bmw_group),
    ("Mercedes", mercedes_group),
    ("Audi", audi_group),
    ("Volkswagen", volkswagen_group),
];

const MERCEDES_EQ_PREFIXES: &[&str] = &["EQA", "EQB", "EQC", "EQE", "EQS", "EQV"];

/// A named group and the brand's models that fall into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGroup {
    pub name: String,
    pub models: Vec<&'static str>,
}

/// The group a model belongs to.
///
/// ```
/// use lunnar_core::catalog::model_group;
///
/// assert_eq!(model_group("BMW", "320"), "3 Series");
/// assert_eq!(model_group("Mercedes", "GLC 220"), "GLC-Class");
/// assert_eq!(model_group("Toyota", "Corolla Cross"), "Corolla");
/// ```
#[must_use]
pub fn model_group(brand: &str, model: &str) -> String {
    let rule = GROUP_RULES
        .iter()
        .find(|(name, _)| *name == brand)
        .map_or(first_word as GroupRule, |(_, rule)| *rule);
    rule(model).unwrap_or_else(|| OTHER_GROUP.to_owned())
}

/// Groups of a known brand's models, in first-seen order.
///
/// Unknown brands have no groups.
#[must_use]
pub fn model_groups(brand: &str) -> Vec<ModelGroup> {
    let Some(known) = find_brand(brand) else {
        return Vec::new();
    };

    let mut groups: Vec<ModelGroup> = Vec::new();
    for model in known.models {
        let name = model_group(brand, model);
        match groups.iter_mut().find(|group| group.name == name) {
            Some(group) => group.models.push(model),
            None => groups.push(ModelGroup {
                name,
                models: vec![model],
            }),
        }
    }
    groups
}

fn first_word(model: &str) -> Option<String> {
    model.split_whitespace().next().map(str::to_owned)
}

fn bmw_group(model: &str) -> Option<String> {
    let first = model.chars().next()?;
    match first {
        '1'..='8' => Some(format!("{first} Series")),
        'X' => Some("X Series".to_owned()),
        'Z' => Some("Z Series".to_owned()),
        'i' => Some("i Series".to_owned()),
        'M' => Some("M Series".to_owned()),
        _ => None,
    }
}

fn mercedes_group(model: &str) -> Option<String> {
    let prefix_len = model
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(model.len());
    let prefix = model.get(..prefix_len).filter(|p| !p.is_empty())?;
    if MERCEDES_EQ_PREFIXES.contains(&prefix) {
        Some("EQ".to_owned())
    } else {
        Some(format!("{prefix}-Class"))
    }
}

fn audi_group(model: &str) -> Option<String> {
    // Order matters: "RS" must be tested before "S" and after "A"/"Q".
    const PREFIXES: &[(&str, &str)] = &[
        ("A", "A Series"),
        ("Q", "Q Series"),
        ("RS", "RS Series"),
        ("S", "S Series"),
        ("TT", "TT"),
        ("e-tron", "e-tron"),
    ];
    PREFIXES
        .iter()
        .find(|(prefix, _)| model.starts_with(prefix))
        .map(|(_, group)| (*group).to_owned())
}

fn volkswagen_group(model: &str) -> Option<String> {
    if model.contains("Golf") {
        Some("Golf".to_owned())
    } else if model.contains("Passat") {
        Some("Passat".to_owned())
    } else if model.starts_with("ID") {
        Some("ID".to_owned())
    } else if model.starts_with("T-") {
        Some("T-Roc / T-Cross".to_owned())
    } else {
        first_word(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmw_groups() {
        assert_eq!(model_group("BMW", "118"), "1 Series");
        assert_eq!(model_group("BMW", "850"), "8 Series");
        assert_eq!(model_group("BMW", "X5"), "X Series");
        assert_eq!(model_group("BMW", "Z4"), "Z Series");
        assert_eq!(model_group("BMW", "iX3"), "i Series");
        assert_eq!(model_group("BMW", "M3"), "M Series");
        assert_eq!(model_group("BMW", "Isetta"), OTHER_GROUP);
        assert_eq!(model_group("BMW", "9er"), OTHER_GROUP);
    }

    #[test]
    fn test_mercedes_groups() {
        assert_eq!(model_group("Mercedes", "C 220"), "C-Class");
        assert_eq!(model_group("Mercedes", "CLA 45 AMG"), "CLA-Class");
        assert_eq!(model_group("Mercedes", "EQS"), "EQ");
        assert_eq!(model_group("Mercedes", "Vito"), "V-Class");
        assert_eq!(model_group("Mercedes", "sprinter"), OTHER_GROUP);
    }

    #[test]
    fn test_audi_groups() {
        assert_eq!(model_group("Audi", "A4"), "A Series");
        assert_eq!(model_group("Audi", "Q4 e-tron"), "Q Series");
        assert_eq!(model_group("Audi", "RS6"), "RS Series");
        assert_eq!(model_group("Audi", "SQ5"), "S Series");
        assert_eq!(model_group("Audi", "TT RS"), "TT");
        assert_eq!(model_group("Audi", "e-tron GT"), "e-tron");
        assert_eq!(model_group("Audi", "R8"), OTHER_GROUP);
    }

    #[test]
    fn test_volkswagen_groups() {
        assert_eq!(model_group("Volkswagen", "Golf VII"), "Golf");
        assert_eq!(model_group("Volkswagen", "Passat CC"), "Passat");
        assert_eq!(model_group("Volkswagen", "ID.Buzz"), "ID");
        assert_eq!(model_group("Volkswagen", "T-Roc"), "T-Roc / T-Cross");
        assert_eq!(model_group("Volkswagen", "Tiguan Allspace"), "Tiguan");
    }

    #[test]
    fn test_other_brands_use_first_word() {
        assert_eq!(model_group("Tesla", "Model 3"), "Model");
        assert_eq!(model_group("Kia", "Ceed"), "Ceed");
        assert_eq!(model_group("Unknown", ""), OTHER_GROUP);
    }

    #[test]
    fn test_model_groups_for_brand() {
        let groups = model_groups("Volkswagen");
        let golf = groups.iter().find(|g| g.name == "Golf");
        assert!(golf.is_some_and(|g| g.models.len() == 11));
        assert_eq!(groups.first().map(|g| g.name.as_str()), Some("Amarok"));
        assert!(model_groups("Lada").is_empty());
    }
}
