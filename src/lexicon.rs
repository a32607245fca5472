// src/lexicon.rs
//! Static keyword tables: labour-market sectors, role anchors, concept clusters,
//! supervisory vocabulary and the compiled cue patterns the scorer and rules use.
//!
//! All cue regexes run against normalized text (lowercase ASCII letters and
//! single spaces), so they are written without case flags or punctuation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

use crate::text::{is_stopword, normalize};

/// Sector names are static table keys; ordered so explanations are stable.
pub type SectorSet = BTreeSet<&'static str>;

/// A keyword list that mixes single words and multi-word phrases.
///
/// Single words match against a token set. Phrases match as substrings of the
/// normalized text. Single words that the tokenizer drops as stopwords
/// ("quality", "lead") are matched as whole words of the normalized text instead,
/// otherwise they could never fire.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    words: HashSet<String>,
    bare_words: Vec<String>,
    phrases: Vec<String>,
}

impl KeywordSet {
    pub fn new(keywords: &[&str]) -> Self {
        let mut set = Self::default();
        for raw in keywords {
            let k = normalize(&raw.replace('_', " "));
            if k.is_empty() {
                continue;
            }
            if k.contains(' ') {
                set.phrases.push(k);
            } else if is_stopword(&k) {
                set.bare_words.push(k);
            } else {
                set.words.insert(k);
            }
        }
        set
    }

    /// Number of distinct keywords present.
    pub fn hits(&self, normalized: &str, tokens: &HashSet<String>) -> usize {
        let words = tokens.iter().filter(|t| self.words.contains(*t)).count();
        let bare = self
            .bare_words
            .iter()
            .filter(|b| normalized.split(' ').any(|w| w == b.as_str()))
            .count();
        let phrases = self
            .phrases
            .iter()
            .filter(|p| normalized.contains(p.as_str()))
            .count();
        words + bare + phrases
    }

    pub fn matches(&self, normalized: &str, tokens: &HashSet<String>) -> bool {
        tokens.iter().any(|t| self.words.contains(t))
            || self
                .bare_words
                .iter()
                .any(|b| normalized.split(' ').any(|w| w == b.as_str()))
            || self.phrases.iter().any(|p| normalized.contains(p.as_str()))
    }
}

fn word_set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

/// True when any token is in `set`.
pub fn any_in(tokens: &HashSet<String>, set: &HashSet<&'static str>) -> bool {
    tokens.iter().any(|t| set.contains(t.as_str()))
}

pub fn count_in(tokens: &HashSet<String>, set: &HashSet<&'static str>) -> usize {
    tokens.iter().filter(|t| set.contains(t.as_str())).count()
}

const SECTOR_TABLE: &[(&str, &[&str])] = &[
    (
        "managers",
        &[
            "manager", "managing", "director", "chief", "executive", "ceo", "coo", "cfo", "cio",
            "cto", "chairman", "board", "general", "governance", "policy", "strategic", "strategy",
            "planning", "budget", "kpi", "targets",
        ],
    ),
    (
        "construction",
        &[
            "construction", "building", "worksite", "site", "scaffolding", "concrete", "formwork",
            "rebar", "excavation", "tunnel", "pile", "piling", "draught", "draft", "autocad", "bim",
            "fitout", "renovation", "tiling", "plaster", "glazier", "roof", "roofer", "carpentry",
            "joinery", "brick", "masonry", "drywall", "mep", "plant", "crane", "rigger",
            "architectural", "structural", "clerk_of_works", "quantity", "boq", "drafter",
            "foreman", "superintendent",
        ],
    ),
    (
        "mfg",
        &[
            "manufacturing", "production", "factory", "cnc", "machining", "lathe", "milling",
            "tooling", "assembly", "assembler", "process", "commissioning", "calibration",
            "maintenance", "quality", "qa", "qc", "line", "plant", "operator",
        ],
    ),
    (
        "mfg_electronics",
        &[
            "semiconductor", "wafer", "fab", "cleanroom", "esd", "pcb", "smt", "solder", "bonding",
            "die", "ic", "mems",
        ],
    ),
    (
        "mfg_chemical",
        &[
            "chemical", "refinery", "petrochemical", "reactor", "polymer", "adhesive", "paint",
            "coating", "distillation", "blending",
        ],
    ),
    (
        "mfg_food",
        &[
            "central", "kitchen", "slaughter", "butcher", "baking", "brewery", "distillery",
            "dairy", "confectionery", "haccp", "halal",
        ],
    ),
    (
        "transport",
        &[
            "driver", "driving", "deliver", "delivery", "route", "dispatch", "passengers", "taxi",
            "private", "hire", "van", "lorry", "truck", "trailer", "prime", "mover", "bus",
            "train", "rail", "mrt", "station", "cargo", "freight",
        ],
    ),
    (
        "logistics",
        &[
            "logistics", "warehouse", "storekeeper", "storeman", "inventory", "stock", "picking",
            "packing", "forklift", "reachtruck", "yard", "dc", "hub", "port", "quay", "container",
            "manifest", "awb", "bonded",
        ],
    ),
    (
        "aviation_marine",
        &[
            "pilot", "aircraft", "airline", "cabin", "steward", "airport", "runway", "marine",
            "ship", "vessel", "deckhand", "tug",
        ],
    ),
    (
        "retail",
        &[
            "retail", "shop", "store", "outlet", "cashier", "pos", "merchandising", "category",
            "showroom", "sales", "salesperson", "sales assistant", "shop assistant", "customer",
            "service", "counter", "boutique", "mall", "department",
        ],
    ),
    (
        "hospitality",
        &[
            "hotel", "housekeeping", "linen", "guest", "room", "butler", "steward", "concierge",
            "banquet", "lodging", "resort", "front office", "guest relations",
        ],
    ),
    (
        "travel",
        &[
            "travel", "tourism", "tour", "ticketing", "visa", "booking", "hotel", "resort",
            "itinerary", "tourist", "guest services", "attraction", "cruise",
        ],
    ),
    (
        "fnb",
        &[
            "restaurant", "cafe", "catering", "kitchen", "cook", "chef", "pastry", "baker",
            "barista", "bartender", "stewarding", "menu",
        ],
    ),
    (
        "ict",
        &[
            "software", "developer", "programmer", "devops", "application", "system", "database",
            "data", "network", "server", "cloud", "security", "cyber", "infrastructure", "telecom",
            "ai", "ml", "testing", "qa", "product manager", "architect", "api", "frontend",
            "backend", "fullstack", "ui", "ux", "scrum", "agile",
        ],
    ),
    (
        "arts_media",
        &[
            "gallery", "museum", "curator", "artist", "designer", "graphic", "multimedia",
            "animation", "photography", "broadcast", "radio", "television", "film", "editor",
            "content", "journalist", "reporter", "pr", "copywriter", "printing", "orchestra",
            "choir",
        ],
    ),
    (
        "engineering",
        &[
            "engineer", "mechanical", "electrical", "electronics", "civil", "chemical",
            "environmental", "biomedical", "process", "quality", "industrial", "production",
            "maintenance", "commissioning", "calibration", "design", "workshop",
        ],
    ),
    (
        "finance",
        &[
            "accounting", "accounts", "accountant", "audit", "auditor", "tax", "treasury",
            "compliance", "risk", "bank", "banking", "loan", "credit", "underwriting", "portfolio",
            "fund", "valuation", "actuarial", "insurer", "insurance", "payroll", "ledger",
        ],
    ),
    (
        "legal",
        &[
            "law", "lawyer", "legal", "solicitor", "advocate", "counsel", "paralegal", "court",
            "litigation", "regulatory",
        ],
    ),
    (
        "public_admin",
        &[
            "ministry", "statutory", "board", "government", "regulatory", "policy", "planning",
            "licensing", "immigration", "customs", "public service", "civil service",
        ],
    ),
    (
        "education",
        &[
            "school", "teacher", "teaching", "student", "classroom", "lecturer", "trainer",
            "polytechnic", "university", "tutor", "curriculum", "syllabus", "preschool",
        ],
    ),
    (
        "healthcare",
        &[
            "patient", "ward", "clinic", "hospital", "nursing", "physician", "dentist", "pharmacy",
            "therapist", "diagnostic", "radiography", "laboratory", "rehabilitation", "paramedic",
            "medical", "surgeon", "doctor", "allied health",
        ],
    ),
    (
        "social",
        &[
            "social", "counsellor", "counselling", "community", "youth", "family", "casework",
            "welfare", "outreach", "volunteer",
        ],
    ),
    (
        "cleaning",
        &[
            "cleaning", "cleaner", "janitor", "sanitation", "disinfection", "premises",
            "landscape", "conservancy", "sweeping", "mopping", "dishwasher",
        ],
    ),
    (
        "security",
        &[
            "security", "guard", "patrol", "cctv", "command centre", "incident", "auxiliary",
            "police", "prison", "investigator", "lifeguard", "fire rescue",
        ],
    ),
    (
        "agri",
        &[
            "farm", "agriculture", "horticulture", "landscape", "nursery", "aquaculture",
            "poultry", "livestock", "gardener", "tree",
        ],
    ),
    (
        "beauty",
        &[
            "beautician", "makeup", "manicurist", "pedicurist", "spa", "massage", "therapist",
            "hairdresser", "barber", "cosmetology",
        ],
    ),
    (
        "waste_env",
        &[
            "waste", "recycling", "material recovery", "grease", "collection", "environmental",
            "sanitarian", "hygiene",
        ],
    ),
    (
        "arch_design",
        &[
            "architect", "architecture", "urban", "town", "planner", "planning", "survey",
            "surveyor", "cad", "bim", "draughtsman", "draughtsperson", "drafter", "interior",
            "product design", "landscape architect",
        ],
    ),
    (
        "electrical",
        &[
            "electrician", "electrical", "wiring", "switchboard", "conduit", "cable pulling",
            "testing and commissioning",
        ],
    ),
    (
        "fitness_instruction",
        &[
            "instructor", "fitness", "coach", "gym", "studio", "personal trainer", "martial arts",
            "yoga", "pilates", "zumba", "training", "mentorship",
        ],
    ),
];

static SECTORS: Lazy<Vec<(&'static str, KeywordSet)>> = Lazy::new(|| {
    SECTOR_TABLE
        .iter()
        .map(|(name, anchors)| (*name, KeywordSet::new(anchors)))
        .collect()
});

pub fn sector_names() -> impl Iterator<Item = &'static str> {
    SECTOR_TABLE.iter().map(|(name, _)| *name)
}

/// Sectors whose anchors appear in already-normalized text.
pub fn sector_cues_in(normalized: &str, tokens: &HashSet<String>) -> SectorSet {
    SECTORS
        .iter()
        .filter(|(_, anchors)| anchors.matches(normalized, tokens))
        .map(|(name, _)| *name)
        .collect()
}

/// Convenience wrapper over raw text.
pub fn sector_cues(text: &str) -> SectorSet {
    let normalized = normalize(text);
    let tokens = crate::text::token_set(&normalized);
    sector_cues_in(&normalized, &tokens)
}

pub static ROLE_ANCHORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "driver", "painter", "drafter", "draftsman", "draftsperson", "installer", "fitter",
        "welder", "cook", "chef", "butcher", "baker", "barista", "bartender", "supervisor",
        "foreman", "manager", "director", "coordinator", "engineer", "technician", "accountant",
        "accounts", "payroll", "auditor", "tax", "admin", "clerk", "assistant", "receptionist",
        "teacher", "lecturer", "nurse", "therapist", "security", "guard", "cleaner", "housekeeper",
        "steward", "butler", "salesman", "sales", "promoter", "executive", "storekeeper",
        "storeman", "principal", "doctor", "lawyer", "architect",
    ])
});

pub static ADMIN_HINTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&["admin", "administrative", "executive", "clerk", "coordinator"])
});

const CLUSTER_TABLE: &[(&str, &[&str])] = &[
    (
        "project_management",
        &[
            "project", "planning", "schedule", "scheduling", "coordination", "delivery", "timeline",
            "milestones", "operations",
        ],
    ),
    (
        "sales_business_development",
        &[
            "sales", "business development", "bizdev", "account management", "client acquisition",
            "revenue", "growth", "leads", "pipeline",
        ],
    ),
    (
        "data_analysis",
        &[
            "data", "analytics", "reporting", "dashboard", "insights", "metrics", "kpi",
            "business intelligence", "bi",
        ],
    ),
    (
        "customer_support",
        &[
            "customer service", "support", "helpdesk", "client relations", "technical support",
            "issue resolution", "troubleshooting",
        ],
    ),
    (
        "finance_accounting",
        &[
            "finance", "accounting", "bookkeeping", "ledger", "invoicing", "payroll",
            "accounts payable", "ap", "accounts receivable", "ar", "financial reporting", "audit",
            "tax",
        ],
    ),
    (
        "marketing_communications",
        &[
            "marketing", "communications", "comms", "public relations", "pr", "branding",
            "campaigns", "content", "social media", "digital marketing",
        ],
    ),
    (
        "quality_assurance",
        &[
            "quality", "qa", "qc", "quality control", "quality assurance", "testing", "inspection",
            "compliance", "standards",
        ],
    ),
    (
        "supply_chain_logistics",
        &[
            "logistics", "supply chain", "procurement", "purchasing", "sourcing", "inventory",
            "shipping", "freight", "warehouse",
        ],
    ),
    (
        "creative_design",
        &[
            "design", "graphic", "ui", "ux", "user interface", "user experience", "visual",
            "creative", "illustration",
        ],
    ),
];

pub static ROLE_CLUSTERS: Lazy<Vec<(&'static str, KeywordSet)>> = Lazy::new(|| {
    CLUSTER_TABLE
        .iter()
        .map(|(name, kws)| (*name, KeywordSet::new(kws)))
        .collect()
});

pub static ACTION_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "paint", "painting", "spray", "roller", "brush", "drive", "driving", "deliver", "delivery",
        "vehicle", "goods", "fetch", "transport", "draw", "drawing", "draft", "drafting", "autocad",
        "cad", "blueprint", "plan", "planning", "survey", "surveying", "quantify", "measurement",
        "measurements", "boq", "install", "installation", "assemble", "assembly", "maintain",
        "maintenance", "repair", "troubleshoot", "weld", "welding", "operate", "operation",
        "machinery", "commission", "commissioning", "calibrate", "calibration", "cook", "cooking",
        "bake", "baking", "butcher", "cut", "cutting", "plaster", "tile", "glaze", "inspect",
        "inspection", "test", "testing", "audit", "auditing", "design", "designing", "configure",
        "configuration", "monitor", "monitoring", "teach", "teaching", "care", "caring", "nurse",
        "nursing", "treat", "treatment", "diagnose", "diagnosis", "clean", "cleaning", "sanitize",
        "sanitise", "wash", "washing", "polish", "polishing", "pack", "packing", "pick", "picking",
    ])
});

/// Vocabulary that marks a role as supervisory. Also stripped before the
/// residual-context comparison for managers.
pub static SUPERVISORY: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "supervisor", "supervisors", "supervise", "supervising", "supervision", "foreman",
        "foremen", "manager", "managers", "managing", "manage", "manages", "managed",
        "management", "head", "chief", "lead", "leader", "oversee", "overseeing", "coordinating",
        "coordination", "directing", "director", "directors", "superintendent",
    ])
});

pub static SUPERVISE_CUES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "supervise", "supervision", "manage", "oversee", "lead", "coordinate", "assign",
        "schedule", "train", "coach", "report", "budget", "plan", "crew", "team",
    ])
});

pub static JUNIOR_TITLE_CUES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "executive", "assistant", "asst", "associate", "clerk", "coordinator", "junior",
        "attendant",
    ])
});

/// Qualifiers that say nothing about the job itself.
pub static GENERIC_TITLE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "associate", "assistant", "executive", "officer", "specialist", "professional", "staff",
        "clerk", "assoc", "prof", "senior", "junior", "lead", "principal",
    ])
});

pub static GENERIC_ENGINEERING: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "engineer", "engineers", "engineering", "technical", "technician", "design", "develop",
        "specifications", "testing", "analysis", "solutions", "consultancy",
    ])
});

pub static SOFTWARE_SYSTEMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "system", "systems", "software", "embedded", "network", "database", "cloud", "security",
        "cyber", "application", "it",
    ])
});

pub static PHYSICAL_SCIENCES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "materials", "chemical", "civil", "structural", "optical", "mechanical", "mining",
        "petroleum",
    ])
});

pub static CORPORATE_FUNCTION: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "finance", "financial", "accounting", "audit", "tax", "treasury", "risk", "hr",
        "human resource", "payroll", "recruitment", "talent", "it", "ict", "software", "network",
        "cybersecurity", "infrastructure",
    ])
});

pub static OPERATIONAL_CONTEXT: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "workshop", "factory", "site", "production", "plant", "construction", "repair",
        "maintenance", "vehicle", "machinery",
    ])
});

pub static TEXTILE_MACHINE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "sewing", "garment", "textile", "fabric", "stitching", "embroidery", "overlock",
    ])
});

/// Machining and CAD/CAM vocabulary.
pub static TECHNICAL: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "cnc", "cam", "cad", "machining", "machinist", "lathe", "milling", "grinding",
        "fabrication", "welding", "g-code", "m-code", "mastercam", "solidworks", "autocad",
        "unigraphics", "setter", "operator", "programmer",
    ])
});

pub static MACHINING_CUES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&["cnc", "machining", "machinist", "lathe", "milling", "setter"])
});

pub static MARINE_CONTEXT: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "marine", "maritime", "ship", "ships", "vessel", "vessels", "shipyard", "deck", "hull",
        "offshore",
    ])
});

pub static DIGITAL_DESIGN: Lazy<KeywordSet> = Lazy::new(|| {
    KeywordSet::new(&[
        "digital", "graphic", "multimedia", "web", "ui", "ux", "marketing", "visual content",
        "branding", "illustrator", "photoshop", "figma",
    ])
});

/// A discipline router table: name, keywords, target code.
pub struct Discipline {
    pub name: &'static str,
    pub keywords: KeywordSet,
    pub code: &'static str,
    pub title: &'static str,
}

pub static DRAFTER_DISCIPLINES: Lazy<Vec<Discipline>> = Lazy::new(|| {
    vec![
        Discipline {
            name: "civil",
            keywords: KeywordSet::new(&["civil", "structural", "construction", "building"]),
            code: "31183",
            title: "Civil/Structural engineering draughtsperson",
        },
        Discipline {
            name: "electrical",
            keywords: KeywordSet::new(&["electrical", "power", "switchboard"]),
            code: "31182",
            title: "Electrical/Electronics draughtsperson",
        },
        Discipline {
            name: "mechanical",
            keywords: KeywordSet::new(&["mechanical", "piping", "hvac", "acmv", "workshop"]),
            code: "31181",
            title: "Mechanical draughtsperson",
        },
        Discipline {
            name: "architectural",
            keywords: KeywordSet::new(&[
                "architectural", "floor plan", "elevation", "interior", "architect",
            ]),
            code: "31184",
            title: "Architectural draughtsperson",
        },
    ]
});

pub const GENERAL_DRAFTER_CODE: &str = "31189";
pub const GENERAL_DRAFTER_TITLE: &str = "Draughtsperson n.e.c.";

pub static SAFETY_DISCIPLINES: Lazy<Vec<Discipline>> = Lazy::new(|| {
    vec![
        Discipline {
            name: "occupational_health",
            keywords: KeywordSet::new(&[
                "occupational", "health", "wsh", "workplace", "ergonomics", "risk assessment",
            ]),
            code: "32572",
            title: "Occupational health and safety inspector",
        },
        Discipline {
            name: "industrial_engineering",
            keywords: KeywordSet::new(&[
                "industrial", "factory", "plant", "manufacturing", "machinery", "construction",
                "engineer",
            ]),
            code: "21493",
            title: "Industrial safety engineer",
        },
        Discipline {
            name: "fire",
            keywords: KeywordSet::new(&[
                "fire", "alarm", "sprinkler", "extinguisher", "evacuation", "scdf",
            ]),
            code: "31711",
            title: "Fire safety inspector",
        },
        Discipline {
            name: "product_vehicle",
            keywords: KeywordSet::new(&[
                "vehicle", "automotive", "product", "process", "quality", "component",
            ]),
            code: "31720",
            title: "Product safety inspector",
        },
    ]
});

pub const GENERAL_SAFETY_CODE: &str = "32573";

/// Picks the discipline with the most keyword hits; ties go to the earlier
/// entry. `None` when nothing matched.
pub fn route_discipline<'a>(
    table: &'a [Discipline],
    normalized: &str,
    tokens: &HashSet<String>,
) -> Option<&'a Discipline> {
    let mut best: Option<(&Discipline, usize)> = None;
    for d in table {
        let hits = d.keywords.hits(normalized, tokens);
        if hits > 0 && best.map_or(true, |(_, b)| hits > b) {
            best = Some((d, hits));
        }
    }
    best.map(|(d, _)| d)
}

fn cue(pattern: &str) -> Regex {
    // Patterns below are literals; a failure here is a programming error caught by tests.
    Regex::new(pattern).unwrap_or_else(|e| panic!("lexicon cue `{pattern}`: {e}"))
}

pub static VEHICLE_CUES: Lazy<Regex> =
    Lazy::new(|| cue(r"\b(auto|car|vehicle|motor|automotive|bodyshop|panel|bumper|spray booth)\b"));
pub static BUILDING_PAINT_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(wall|walls|ceiling|ceilings|facade|interior|exterior|building|structure|premises|floor|room|units?)\b")
});
pub static ARTS_MEDIA_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(orchestra|choir|stage|film|theatre|theater|shoot|broadcast|studio|gallery|museum|curator|composer|conductor|perform(ing|ance)|band)\b")
});
pub static HOSPITALITY_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(hotel|resort|guest|housekeeping|butler|steward|banquet|front office|concierge|lodging)\b")
});
pub static GAMING_CUES: Lazy<Regex> =
    Lazy::new(|| cue(r"\b(casino|gaming|pit boss|tables?|jackpot|slots?)\b"));
pub static SPORTS_CUES: Lazy<Regex> =
    Lazy::new(|| cue(r"\b(sports?|stadium|arena|gym|fitness|leisure|recreation|club)\b"));
pub static MARKETING_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(marketing|brand|branding|campaign|advertis(e|ing)|digital\s+marketing)\b")
});
pub static CONSTRUCTION_LABOUR_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(work\s?site|worksite|cleaning work\s?sites?|remove (site )?obstructions|debris|demolition|trench|scaffold|construction|site)\b")
});
pub static ELECTRICIAN_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(electrician|electrical wiring|install(ing|ation) electrical|switchboard|cable pulling|cabling)\b")
});
pub static DRAFTER_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(autocad|auto cad|cad|drafter|drafts?man|draftsperson|draughts?man|draughtspersons?|bim|shop drawings?|technical drawings?|layouts?)\b")
});
/// Drafting job nouns. Tool words like `cad` or `layout` alone do not make a drafter.
pub static DRAFTER_TITLE: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(drafter|drafts?man|draftsperson|draughts?man|draughtspersons?|cad drafter|cad technician)\b")
});
pub static ADMIN_MANAGER_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(manage(s|d|ment)? (admin(istration)?|team|department)|oversee admin|lead admin)\b")
});
pub static ATTRACTIONS_CUES: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(attractions?|theme park|zoo|park manager|nature park|botanic)\b")
});
pub static WELLNESS_CUES: Lazy<Regex> =
    Lazy::new(|| cue(r"\b(wellness|spa|fitness|health|therapy|recreation)\b"));
pub static SUBORDINATE_PHRASE: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(assist(ing)?|support(ing)?|report(ing)?\s+to?)\s+(\w+\s+){0,2}(director|manager|ceo|chief)\b")
});
pub static NATIONAL_ARMED_FORCES: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(saf|singapore armed forces|singapore army|rsn|rsaf|mindef)\b")
});
pub static FOREIGN_ARMED_FORCES: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(foreign armed forces|foreign military|us army|us navy|us air force|royal navy|adf|pla|idf)\b")
});
pub static DIPLOMATIC: Lazy<Regex> = Lazy::new(|| {
    cue(r"\b(ambassador|high commissioner|attache|consul|consular|diplomat|diplomatic|embassy|charge? d ?affaires)\b")
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextFeatures;

    #[test]
    fn all_cue_patterns_compile() {
        for re in [
            &*VEHICLE_CUES,
            &*BUILDING_PAINT_CUES,
            &*ARTS_MEDIA_CUES,
            &*HOSPITALITY_CUES,
            &*GAMING_CUES,
            &*SPORTS_CUES,
            &*MARKETING_CUES,
            &*CONSTRUCTION_LABOUR_CUES,
            &*ELECTRICIAN_CUES,
            &*DRAFTER_CUES,
            &*DRAFTER_TITLE,
            &*ADMIN_MANAGER_CUES,
            &*ATTRACTIONS_CUES,
            &*WELLNESS_CUES,
            &*SUBORDINATE_PHRASE,
            &*NATIONAL_ARMED_FORCES,
            &*FOREIGN_ARMED_FORCES,
            &*DIPLOMATIC,
        ] {
            assert!(!re.as_str().is_empty());
        }
    }

    #[test]
    #[should_panic(expected = "lexicon cue `(unclosed`")]
    fn bad_cue_names_its_pattern() {
        let _ = cue("(unclosed");
    }

    #[test]
    fn multi_word_anchor_matches_as_substring() {
        let cues = sector_cues("Front office supervisor at a hotel");
        assert!(cues.contains("hospitality"), "{cues:?}");

        let cues = sector_cues("testing and commissioning of switchgear");
        assert!(cues.contains("electrical"), "{cues:?}");
    }

    #[test]
    fn single_anchor_requires_whole_token() {
        // "drivers" is not the anchor "driver"
        let cues = sector_cues("screwdrivers");
        assert!(!cues.contains("transport"), "{cues:?}");
    }

    #[test]
    fn stopword_keywords_still_match() {
        let f = TextFeatures::from_text("quality inspection of parts");
        assert!(f.sectors.contains("mfg"), "{:?}", f.sectors);
    }

    #[test]
    fn clerk_of_works_underscore_anchor() {
        let cues = sector_cues("Clerk of works");
        assert!(cues.contains("construction"), "{cues:?}");
    }

    #[test]
    fn discipline_router_picks_largest_intersection() {
        let f = TextFeatures::from_text("draftsman piping hvac layouts for structural steel");
        let d = route_discipline(&DRAFTER_DISCIPLINES, &f.normalized, &f.token_set)
            .expect("discipline");
        assert_eq!(d.code, "31181");

        let f = TextFeatures::from_text("draftsman");
        assert!(route_discipline(&DRAFTER_DISCIPLINES, &f.normalized, &f.token_set).is_none());
    }

    #[test]
    fn subordinate_phrase_detection() {
        assert!(SUBORDINATE_PHRASE.is_match("assisting the managing director in daily tasks"));
        assert!(SUBORDINATE_PHRASE.is_match("reporting to ceo"));
        assert!(!SUBORDINATE_PHRASE.is_match("managing director of group"));
    }

    #[test]
    fn sector_table_is_complete() {
        assert_eq!(sector_names().count(), 30);
    }
}
