//! Known brands and their model names.
//!
//! Drives the brand/model pickers, grouped model options and demo data.

/// A car brand with its known model names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brand {
    pub name: &'static str,
    pub models: &'static [&'static str],
}

/// Cities offered for listings and demo data.
pub const CITIES: &[&str] = &[
    "Budapest",
    "Debrecen",
    "Szeged",
    "Miskolc",
    "Pécs",
    "Győr",
    "Nyíregyháza",
    "Kecskemét",
    "Székesfehérvár",
    "Szombathely",
];

/// All known brands.
pub static BRANDS: &[Brand] = &[
    Brand {
        name: "Audi",
        models: &[
            "A1", "A2", "A3", "A4", "A5", "A6", "A7", "A8", "Q2", "Q3", "Q4 e-tron", "Q5", "Q7",
            "Q8", "R8", "RS3", "RS4", "RS5", "RS6", "RS7", "S1", "S3", "S4", "S5", "S6", "S7", "S8",
            "SQ2", "SQ5", "SQ7", "SQ8", "TT", "TT RS", "e-tron", "e-tron GT",
        ],
    },
    Brand {
        name: "BMW",
        models: &[
            "114", "116", "118", "120", "123", "125", "214", "216", "218", "220", "225", "316",
            "318", "320", "323", "325", "328", "330", "335", "340", "418", "420", "425", "428",
            "430", "435", "440", "518", "520", "523", "525", "528", "530", "535", "540", "545",
            "550", "630", "635", "640", "650", "725", "728", "730", "735", "740", "745", "750",
            "760", "840", "850", "M1", "M2", "M3", "M4", "M5", "M6", "M8", "X1", "X2", "X3", "X4",
            "X5", "X6", "X7", "Z3", "Z4", "i3", "i4", "i7", "i8", "iX", "iX1", "iX3",
        ],
    },
    Brand {
        name: "Mercedes",
        models: &[
            "A 140", "A 150", "A 160", "A 170", "A 180", "A 190", "A 200", "A 210", "A 220",
            "A 250", "A 45 AMG", "B 150", "B 160", "B 170", "B 180", "B 200", "B 220", "B 250",
            "C 160", "C 180", "C 200", "C 220", "C 230", "C 240", "C 250", "C 270", "C 280",
            "C 300", "C 320", "C 350", "C 400", "C 43 AMG", "C 63 AMG", "CL 500", "CL 600",
            "CLA 180", "CLA 200", "CLA 220", "CLA 250", "CLA 45 AMG", "CLK 200", "CLK 230",
            "CLK 270", "CLK 320", "CLS 250", "CLS 320", "CLS 350", "CLS 400", "CLS 500",
            "CLS 63 AMG", "E 200", "E 220", "E 230", "E 240", "E 250", "E 270", "E 280", "E 290",
            "E 300", "E 320", "E 350", "E 400", "E 420", "E 430", "E 500", "E 55 AMG", "E 63 AMG",
            "G 270", "G 300", "G 320", "G 350", "G 400", "G 500", "G 55 AMG", "G 63 AMG", "GL 320",
            "GL 350", "GL 420", "GL 450", "GL 500", "GLA 180", "GLA 200", "GLA 220", "GLA 250",
            "GLA 45 AMG", "GLB 180", "GLB 200", "GLB 220", "GLB 250", "GLC 200", "GLC 220",
            "GLC 250", "GLC 300", "GLC 350", "GLE 250", "GLE 300", "GLE 350", "GLE 400", "GLE 450",
            "GLE 500", "GLE 63 AMG", "GLK 200", "GLK 220", "GLK 250", "GLK 320", "GLK 350",
            "GLS 350", "GLS 400", "GLS 500", "GLS 63 AMG", "ML 230", "ML 270", "ML 280", "ML 300",
            "ML 320", "ML 350", "ML 400", "ML 420", "ML 430", "ML 450", "ML 500", "ML 55 AMG",
            "ML 63 AMG", "R 280", "R 300", "R 320", "R 350", "R 500", "S 250", "S 280", "S 300",
            "S 320", "S 350", "S 400", "S 420", "S 430", "S 450", "S 500", "S 550", "S 560",
            "S 600", "S 63 AMG", "S 65 AMG", "SL 280", "SL 300", "SL 320", "SL 350", "SL 380",
            "SL 400", "SL 420", "SL 450", "SL 500", "SL 560", "SL 600", "SL 63 AMG", "SL 65 AMG",
            "SLC 180", "SLC 200", "SLC 300", "SLK 200", "SLK 230", "SLK 250", "SLK 280", "SLK 300",
            "SLK 320", "SLK 350", "SLK 55 AMG", "V 200", "V 220", "V 230", "V 250", "Vito", "X 220",
            "X 250", "X 350", "EQA", "EQB", "EQC", "EQE", "EQS", "EQV",
        ],
    },
    Brand {
        name: "Volkswagen",
        models: &[
            "Amarok", "Arteon", "Beetle", "Bora", "Caddy", "CC", "Corrado", "Crafter", "Eos", "Fox",
            "Golf I", "Golf II", "Golf III", "Golf IV", "Golf V", "Golf VI", "Golf VII",
            "Golf VIII", "Golf", "Golf Plus", "Golf Sportsvan", "ID.3", "ID.4", "ID.5", "ID.Buzz",
            "Jetta", "Lupo", "Multivan", "New Beetle", "Passat B1", "Passat B2", "Passat B3",
            "Passat B4", "Passat B5", "Passat B6", "Passat B7", "Passat B8", "Passat CC", "Passat",
            "Phaeton", "Polo", "Scirocco", "Sharan", "T-Cross", "T-Roc", "Taigo", "Tiguan",
            "Tiguan Allspace", "Touareg", "Touran", "Transporter", "Up!",
        ],
    },
    Brand {
        name: "Toyota",
        models: &[
            "4-Runner", "Auris", "Avensis", "Aygo", "Aygo X", "C-HR", "Camry", "Celica", "Corolla",
            "Corolla Cross", "Corolla Verso", "GR86", "GT86", "Hiace", "Highlander", "Hilux", "IQ",
            "Land Cruiser", "Mirai", "MR2", "Paseo", "Picnic", "Previa", "Prius", "Prius Plus",
            "Proace", "Proace City", "RAV4", "Starlet", "Supra", "Urban Cruiser", "Verso",
            "Verso-S", "Yaris", "Yaris Cross", "Yaris Verso",
        ],
    },
    Brand {
        name: "Ford",
        models: &[
            "B-Max", "C-Max", "Capri", "Cougar", "EcoSport", "Edge", "Escort", "Explorer", "F-150",
            "Fiesta", "Focus", "Focus C-Max", "Focus CC", "Fusion", "Galaxy", "Granada",
            "Grand C-Max", "Ka", "Ka+", "Kuga", "Maverick", "Mondeo", "Mustang", "Mustang Mach-E",
            "Orion", "Probe", "Puma", "Ranger", "S-Max", "Scorpio", "Sierra", "Streetka",
            "Tourneo Connect", "Tourneo Courier", "Tourneo Custom", "Transit", "Transit Connect",
            "Transit Courier", "Transit Custom",
        ],
    },
    Brand {
        name: "Opel",
        models: &[
            "Adam", "Agila", "Ampera", "Antara", "Ascona", "Astra", "Astra F", "Astra G", "Astra H",
            "Astra J", "Astra K", "Astra L", "Calibra", "Cascada", "Combo", "Corsa", "Corsa A",
            "Corsa B", "Corsa C", "Corsa D", "Corsa E", "Corsa F", "Crossland", "Crossland X",
            "Frontera", "Grandland", "Grandland X", "Insignia", "Insignia A", "Insignia B",
            "Kadett", "Karl", "Meriva", "Meriva A", "Meriva B", "Mokka", "Mokka X", "Monterey",
            "Movano", "Omega", "Signum", "Sintra", "Tigra", "Vectra", "Vectra A", "Vectra B",
            "Vectra C", "Vivaro", "Zafira", "Zafira A", "Zafira B", "Zafira C", "Zafira Life",
        ],
    },
    Brand {
        name: "Škoda",
        models: &[
            "Citigo", "Enyaq", "Enyaq iV", "Fabia", "Fabia I", "Fabia II", "Fabia III", "Fabia IV",
            "Felicia", "Forman", "Kamiq", "Karoq", "Kodiaq", "Kushaq", "Octavia", "Octavia I",
            "Octavia II", "Octavia III", "Octavia IV", "Praktik", "Rapid", "Roomster", "Scala",
            "Slavia", "Superb", "Superb I", "Superb II", "Superb III", "Yeti",
        ],
    },
    Brand {
        name: "Renault",
        models: &[
            "Alaskan", "Arkana", "Austral", "Avantime", "Captur", "Clio", "Clio I", "Clio II",
            "Clio III", "Clio IV", "Clio V", "Espace", "Fluence", "Grand Espace", "Grand Scenic",
            "Kadjar", "Kangoo", "Koleos", "Laguna", "Laguna I", "Laguna II", "Laguna III",
            "Latitude", "Master", "Megane", "Megane I", "Megane II", "Megane III", "Megane IV",
            "Megane E-Tech", "Modus", "Safrane", "Scenic", "Scenic I", "Scenic II", "Scenic III",
            "Scenic IV", "Symbol", "Talisman", "Thalia", "Trafic", "Twingo", "Twingo I",
            "Twingo II", "Twingo III", "Twizy", "Vel Satis", "Wind", "Zoe",
        ],
    },
    Brand {
        name: "Hyundai",
        models: &[
            "Accent", "Atos", "Atos Prime", "Bayon", "Coupe", "Elantra", "Galloper", "Genesis",
            "Getz", "Grandeur", "H-1", "H-1 Starex", "H-100", "H350", "i10", "i20", "i30", "i40",
            "Ioniq", "Ioniq 5", "Ioniq 6", "ix20", "ix35", "ix55", "Kona", "Lantra", "Matrix",
            "Pony", "Santa Fe", "Santamo", "Sonata", "Staria", "Terracan", "Trajet", "Tucson",
            "Veloster", "Venue",
        ],
    },
    Brand {
        name: "Kia",
        models: &[
            "Besta", "Carens", "Carnival", "Ceed", "Cerato", "EV6", "EV9", "Joice", "Magentis",
            "Niro", "Opirus", "Optima", "Picanto", "Pregio", "Pride", "Proceed", "Retona", "Rio",
            "Sephia", "Shuma", "Sorento", "Soul", "Sportage", "Stinger", "Stonic", "Venga", "XCeed",
        ],
    },
    Brand {
        name: "Volvo",
        models: &[
            "240", "340", "440", "460", "480", "740", "760", "850", "940", "960", "C30", "C70",
            "S40", "S60", "S70", "S80", "S90", "V40", "V50", "V60", "V70", "V90", "XC40", "XC60",
            "XC70", "XC90",
        ],
    },
    Brand {
        name: "Peugeot",
        models: &[
            "104", "106", "107", "108", "1007", "204", "205", "206", "206+", "207", "208", "2008",
            "301", "304", "305", "306", "307", "308", "309", "3008", "404", "405", "406", "407",
            "408", "4007", "4008", "504", "505", "508", "5008", "604", "605", "607", "806", "807",
            "Bipper", "Boxer", "Expert", "Ion", "Partner", "RCZ", "Rifter", "Traveller",
        ],
    },
    Brand {
        name: "Mazda",
        models: &[
            "2", "3", "5", "6", "121", "323", "323 F", "626", "B-Series", "BT-50", "CX-3", "CX-30",
            "CX-5", "CX-60", "CX-7", "CX-9", "Demio", "MPV", "MX-3", "MX-5", "MX-6", "MX-30",
            "Premacy", "RX-7", "RX-8", "Tribute", "Xedos 6", "Xedos 9",
        ],
    },
    Brand {
        name: "Honda",
        models: &[
            "Accord", "Civic", "Concerto", "CR-V", "CR-Z", "CRX", "FR-V", "HR-V", "Insight",
            "Integra", "Jazz", "Legend", "Logo", "NSX", "Prelude", "S2000", "Shuttle", "Stream",
            "ZR-V",
        ],
    },
    Brand {
        name: "Tesla",
        models: &[
            "Model 3", "Model S", "Model X", "Model Y", "Cybertruck", "Roadster",
        ],
    },
];

/// Look up a brand by exact name.
#[must_use]
pub fn find_brand(name: &str) -> Option<&'static Brand> {
    BRANDS.iter().find(|brand| brand.name == name)
}

/// Brand names in alphabetical order.
#[must_use]
pub fn brand_names() -> Vec<&'static str> {
    let mut names: Vec<_> = BRANDS.iter().map(|brand| brand.name).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_brand() {
        let tesla = find_brand("Tesla");
        assert!(tesla.is_some_and(|b| b.models.contains(&"Model 3")));
        assert!(find_brand("tesla").is_none());
    }

    #[test]
    fn test_brand_names_sorted_and_complete() {
        let names = brand_names();
        assert_eq!(names.len(), 16);
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
        assert!(names.contains(&"Škoda"));
    }
}
