// tests/common/mod.rs
// Small SSOC-shaped catalogue shared by the integration tests.
#![allow(dead_code)]

use occupation_coder::{CodingEngine, MatcherConfig, OverrideTable, Taxonomy};

pub const CATALOGUE_CSV: &str = r#"SSOC 2024,SSOC 2024 Title,Detailed Definitions,Examples of Job Classified Under this Code
1211,Finance managers,,
12111,Budgeting/Financial accounting manager,"Plans, directs and coordinates budgeting, forecasting and financial accounting activities of an organisation.",Financial controller; Budget manager
13210,Manufacturing manager,"Plans and coordinates production in a factory, including production lines and plant output.",Factory manager
1120,Managing directors and chief executives,,
11201,Managing director/Chief executive officer,"Formulates policies and directs the overall operations of an organisation with the board.",CEO
2142,Civil engineers,,
21421,Civil engineer,"Designs and supervises construction of roads, bridges, drainage and structural works.",Structural engineer; Geotechnical engineer
2152,Electronics engineers,,
21522,Electronics engineer,"Designs electronic circuits, components and communication equipment.",Circuit design engineer
21526,Embedded systems engineer,"Designs and develops embedded software and firmware for microcontroller based devices and IoT products.",Firmware engineer; IoT systems engineer
2211,Medical doctors,,
22110,General practitioner/Physician,"Diagnoses and treats illnesses of patients in a clinic.",Family physician
2310,University lecturers,,
23101,University lecturer,"Teaches undergraduate courses and conducts research at a university.",Professor
2411,Accountants,,
24111,Accountant (General),"Prepares financial statements, audits accounts and advises on tax matters.",Chartered accountant
3118,Draughtspersons,,
31181,Mechanical draughtsperson,"Prepares piping, hvac and mechanical shop drawings using autocad.",Mechanical drafter
31183,Civil/Structural engineering draughtsperson,"Prepares structural and civil drawings for construction projects.",Civil drafter
4110,General office clerks,,
41101,General office clerk,"Performs filing, data entry and general clerical duties in an office.",Office assistant
5132,Baristas,,
51321,Barista,"Prepares and serves espresso coffee drinks at a cafe counter.",Coffee artisan
7131,Painters,,
71311,House/Building painter,"Paints walls, ceilings and exteriors of buildings.",Wall painter
71322,Motor vehicle spray painter,"Spray paints car bodies and panels in a spray booth.",Car spray painter
7223,Machine-tool setters,,
72231,Machine-tool setter-operator,"Sets up and operates cnc lathes and milling machines.",CNC lathe operator
7411,Electricians,,
74110,Electrician,"Installs and repairs electrical wiring, switchboards and fixtures in buildings.",Wireman; Electrical fitter
8153,Sewing machine operators,,
81531,Sewing machine operator,"Operates sewing machines to make garments.",Seamstress machinist
8332,Lorry drivers,,
83321,Lorry/Truck driver,"Drives lorries to transport goods over land.",Prime mover driver
9113,Cleaners,,
91131,Office/Commercial/Industrial establishment indoor cleaner,"Cleans offices, toilets and common areas of commercial buildings.",Office cleaner
"#;

pub fn taxonomy() -> Taxonomy {
    Taxonomy::from_csv_str(CATALOGUE_CSV).expect("fixture catalogue")
}

pub fn overrides() -> OverrideTable {
    let mut t = OverrideTable::new();
    t.insert("Finance Director", "12111", "Budgeting/Financial accounting manager");
    t
}

pub fn engine_with(config: MatcherConfig) -> CodingEngine {
    CodingEngine::new(taxonomy(), overrides(), config).expect("engine")
}

pub fn engine() -> CodingEngine {
    engine_with(MatcherConfig::default())
}
