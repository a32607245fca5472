// src/rules.rs
//! Deterministic rule engine: an ordered decision table scanned linearly, first
//! match wins, followed by a few compound rules that need more than one regex.
//!
//! Patterns run on normalized text (lowercase letters and single spaces), which
//! is why they tolerate common misspellings instead of punctuation.

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigurationError;
use crate::lexicon::{
    route_discipline, CONSTRUCTION_LABOUR_CUES, DRAFTER_CUES, DRAFTER_DISCIPLINES, DRAFTER_TITLE,
    GENERAL_DRAFTER_CODE, GENERAL_DRAFTER_TITLE, VEHICLE_CUES,
};
use crate::text::token_set;

/// Serialized rule: `{"id", "pattern", "code", "title", "context"?, "title_only"?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    pub id: String,
    pub pattern: String,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default = "default_title_only")]
    pub title_only: bool,
}

fn default_title_only() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pattern: Regex,
    pub code: String,
    pub title: String,
    context: Option<Regex>,
    pub title_only: bool,
}

impl Rule {
    pub fn compile(spec: &RuleSpec) -> Result<Self, ConfigurationError> {
        let compile = |p: &str| {
            Regex::new(p).map_err(|source| ConfigurationError::InvalidPattern {
                id: spec.id.clone(),
                source,
            })
        };
        Ok(Self {
            id: spec.id.clone(),
            pattern: compile(&spec.pattern)?,
            code: spec.code.clone(),
            title: spec.title.clone(),
            context: spec.context.as_deref().map(compile).transpose()?,
            title_only: spec.title_only,
        })
    }

    fn fires(&self, title_norm: &str, both_norm: &str) -> bool {
        let target = if self.title_only { title_norm } else { both_norm };
        self.pattern.is_match(target)
            && self.context.as_ref().map_or(true, |c| c.is_match(both_norm))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub code: String,
    pub title: String,
    pub rule_id: String,
}

impl RuleMatch {
    fn new(code: &str, title: &str, rule_id: &str) -> Self {
        Self {
            code: code.to_string(),
            title: title.to_string(),
            rule_id: rule_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    compound: bool,
}

// (id, pattern, code, title, context, title_only); order is precedence
#[rustfmt::skip]
const BUILTIN_RULES: &[(&str, &str, &str, &str, Option<&str>, bool)] = &[
    // cleaning, most specific first
    ("rule_cleaner_exact", r"(^\s*cl[ea]?[ae]?n[ae]?rs?$|of+ice\s+cl[ea][ea]ner)", "91131", "Office/Commercial/Industrial establishment indoor cleaner", None, true),
    ("rule_housekeeper", r"\bhousek[e]+p[ae]?rs?\b", "51501", "Housekeeper (Private households, hotels and offices)", None, true),
    ("rule_janitor", r"\bjanitors?\b", "91299", "Other cleaning worker n.e.c.", None, true),
    ("rule_general_cleaner", r"\bgeneral\s+clea?n[ae]?rs?\b", "91131", "Office/Commercial/Industrial establishment indoor cleaner", None, true),

    // human resources
    ("rule_hr_manager", r"\b(hr|human\s+resou?rce|human\s+capital)\s+(directors?|heads?|man[ae]?gers?)\b", "12121", "Human resource manager", None, true),
    ("rule_recruiter", r"\b(recru[ia]ters?|recru[ia]tment|talent\s+acquisition)\b", "24231", "Recruiter/Talent acquisition specialist", None, true),
    ("rule_payroll_officer", r"\bpayroll\s+(specialists?|of+icers?|exec(utive)?s?)\b", "41102", "Payroll officer", None, true),
    ("rule_payroll_clerk", r"\bpayroll\s+cl[ei]rks?\b", "41102", "Payroll clerk", None, true),
    ("rule_hr_generalist_bp", r"\b(hr|human\s+resou?rce)\s+(generalists?|business\s+partn[ae]?rs?|bp)\b", "41102", "Human resource Clerk", None, true),
    ("rule_hr_assistant_exec", r"\b(hr|human\s+resou?rce|human\s+capital)\s+(as+is+t[ae]nts?|exec(utive)?s?|co?ordinators?)\b", "12121", "Human resource manager", None, true),
    ("rule_hr_exact", r"^\s*(hr|human\s+resou?rce)\s*$", "41102", "Human resource Clerk", None, true),

    // education
    ("rule_specific_language_teacher", r"\b(chinese|mandarin|english|malay|tamil|japanese|korean|french|german|spanish)\s+(teach[ae]?rs?|tutors?|instructors?)\b", "36201", "Language instructor (extracurriculum)", None, true),
    ("rule_language_teacher", r"\b(teach[ae]?rs?|tutors?)\b.*\blan?gu[ae]ge\b|\blan?gu[ae]ge\b.*\b(teach[ae]?rs?|tutors?)\b", "36201", "Language instructor (extracurriculum)", None, true),

    // retail, sales, customer service
    ("rule_retail_manager", r"\b(reta?il|shops?|sto?res?)\s+man[ae]?gers?\b", "14201", "Retail/Shop manager", None, true),
    ("rule_cashier", r"\bcash[i][e]rs?\b", "52302", "Cashier (general)", None, true),
    ("rule_sales_person_clerk_asst", r"\b(sales?\s*(p[ae]rsons?|cl[ei]rks?|as+is+t[ae]nts?|executive|exec)|retail\s+sales?|shops?\s+as+is+t[ae]nts?)\b", "52202", "Shop sales assistant", None, true),
    ("rule_retail_sales_sup", r"\b(sales?\s+sup[eia]rvisors?|flo?o?r\s+man[ae]?gers?)\b", "52201", "Sales supervisor", None, true),
    ("rule_customer_service_support", r"\b(custom[ae]?rs?\s*(s[eia]rvices?|sup+o?rt)|client\s+relations)\b", "42245", "Customer service representative", None, true),
    ("rule_flyer_distributor", r"\bflyer\b", "96291", "Leaflet/Newspaper distributor/deliverer", None, true),
    ("rule_merchandiser", r"\bmerchandi?[sz]er\b", "33225", "Merchandising/Category executive", None, true),

    ("rule_tailor_dressmaker", r"\b(tailors?|dres+mak[ae]?rs?)\b", "75310", "Tailor/Dressmaker", None, true),

    // logistics, store, warehouse
    ("rule_storekeeper", r"\b(stores?\s*?k[e]+p[ae]?r|sto?re\s*man|sto?re\s*men)\b", "43212", "Storekeeper", None, true),
    ("rule_warehouse_asst", r"\b(warehouse\s+(as+is+t[ae]nts?|op[ae]?rators?|pick[ae]?rs?|pack[ae]?rs?))\b", "93201", "Hand packer", None, true),
    ("rule_logistics_coord", r"\blogistics?\s+co?ordinators?\b", "33461", "Logistics/Production planner", None, true),
    ("rule_packer", r"\bpack[ae]?rs?\b", "93201", "Hand packer", None, true),
    ("rule_general_worker", r"\bgeneral\s+work[ae]?rs?\b", "96293", "Odd job person", None, true),
    ("rule_forklift", r"\bfork\s*lifts?\b", "83441", "Fork lift truck operator", None, false),

    // drivers
    ("rule_bus_driver", r"\b(bus|coach)\s+driv[ae]?rs?\b", "83311", "Bus driver", None, true),
    ("rule_lorry_truck_driver", r"\b(lor+y|truck)\s*driv[ae]?rs?\b", "83321", "Lorry/Truck driver", None, true),
    ("rule_delivery_driver", r"\bdeliv[ae]?ry\s*driv[ae]?rs?\b", "83229", "Car/Taxi/Van/Light goods vehicle driver n.e.c.", None, true),
    ("rule_driver_exact", r"^\s*driv[ae]?rs?\s*$", "8322", "Car/Taxi/Van/Light goods vehicle driver", None, true),

    // construction site roles
    ("rule_construction_worker", r"\bcons?tr?ucti?on\s+work[ae]?rs?\b", "93100", "Civil engineering/Building construction labourer", None, true),
    ("rule_site_coord", r"\bsite\s+co?ordinators?\b", "31124", "Resident technical officer", Some(r"\b(work\s*site|constru[ck]tion|building|engineering)\b"), true),
    ("rule_site_supervisor", r"site\s+sup[eia]rvisors?", "71000", "Supervisor/General foreman (building and related trades)", None, true),
    ("rule_foreman", r"\b(sup[eia]rvisors?\s*cum\s*general\s*fo?rem[ae]n|fo?rem[ae]n)\b", "71000", "Supervisor/General foreman (building and related trades)", None, true),
    ("rule_safety", r"\bsaf[ae]?ty\s+(of+icers?|sup[eia]rvisors?)\b", "21493", "Industrial safety engineer", None, true),
    ("rule_qs", r"\bquan?tity\s*s[ue]rv[ae]yors?\b", "21494", "Quantity surveyor", None, true),
    ("rule_excavator_operator", r"\bexc[ae]v[ae]to?rs?\s+op[ae]?rat?ors?\b", "83421", "Excavating/Trench digging machine operator", None, true),
    ("rule_pump_operator", r"\bpumps?\s+op[ae]?rat?ors?\b", "31153", "Machining/Tooling technician", Some(r"\b(plant|machine|industrial|construction|site|water|chemical)\b"), false),
    ("rule_qa_engineer", r"\b(quality|qa|qc)\b", "21414", "Quality control/assurance engineer", None, true),
    ("rule_safety_engineer", r"\bsafety\b", "21493", "Industrial safety engineer", None, true),

    // construction trades
    ("rule_carpenter", r"\bcarp[ae]nt[ae]?rs?\b", "71151", "Carpenter", None, true),
    ("rule_plumber", r"\bplumb[ae]?rs?\b", "71261", "Plumber", None, true),
    ("rule_plasterer", r"\bplast[ae]?r[ae]?rs?\b", "71230", "Plasterer", None, true),
    ("rule_tiler", r"\btil[ae]?rs?\b", "71220", "Tiler", None, true),
    ("rule_glazier", r"\bglaz[ie]rs?\b", "71250", "Glazier", None, true),
    ("rule_welder", r"\bweld[ae]?rs?\b", "72120", "Welder", None, true),
    ("rule_scaffolder", r"\b(scaf+old[ae]?rs?|scaf+old)\b", "71191", "Scaffolder", None, false),
    ("rule_architect", r"^architect$", "21610", "Building architect", None, true),
    ("rule_lifting_crane", r"\blifti?ng\b", "83431", "Crane/Hoist operator (excluding port)", None, true),

    // generic engineers
    ("rule_senior_exec_engineer", r"\b(senior|principal|lead|exec(utive)?s?)\s+eng?in[e]+rs?\b", "21499", "Engineering professional n.e.c.", None, true),
    ("rule_sales_engineer", r"\b(sales?\s+eng?in[e]+rs?|techn?i?c?al\s+sales?)\b", "24331", "Technical sales professional", None, true),
    ("rule_vehicle_mechanic", r"\bmechanics?\b", "72310", "Automotive mechanic", Some(r"\b(auto|car|vehicle|motor|automotive|tyre|battery)\b"), false),
    ("rule_cnc", r"cnc", "31153", "Machining/Tooling technician", None, true),

    ("rule_ui_ux_designer", r"\b(ui|ux)\b", "25124", "Interaction designer", None, true),

    // electrical, technicians, engineers
    ("rule_electrician", r"\bel[e]?ctr[ia]ci?ans?\b", "74110", "Electrician", None, true),
    ("rule_mech_tech", r"\bm[e]?ch[ae]n?ic?al\s+techn?i?ci?ans?\b", "31151", "Mechanical engineering technician", None, true),
    ("rule_eng_tech", r"\beng?in[e]+ring\s+techn?i?ci?ans?\b", "31129", "Civil engineering technician n.e.c.", None, true),
    ("rule_elec_engineer", r"\b(el[e]?ctr[ia]c?al\s+eng?in[e]+rs?|swi?tchbo?a?rds?|po?w[ae]?r\s+s[iy]st[e]?ms?)\b", "21511", "Electrical engineer", None, true),
    ("rule_aircon", r"\b(air\s*con|air\s*conditioning)\b", "71271", "Air-conditioning and refrigeration mechanic", None, false),
    ("rule_mech_tech_loose", r"\bm[e]?ch[ae]n?ica?l?\s+techn?i?ci?ans?\b", "31151", "Mechanical engineering technician", None, true),
    ("rule_technician_exact", r"^techn?i?ci?an$", "31151", "Mechanical engineering technician", None, true),

    // healthcare
    ("rule_doctor_gp", r"\b(docto?rs?|ph[iy]sicians?)\b", "22110", "General practitioner/Physician", None, true),
    ("rule_general_practitioner", r"\b(general\s+practition[ae]?rs?)\b", "22110", "General practitioner/Physician", None, true),
    ("rule_registered_staff_nurse", r"\b(registered|staff)\s+nu?rse?s?\b", "22200", "Nursing professional", None, true),
    ("rule_enrolled_nurse", r"\b(enrolled|assistant)\s+nu?rse?s?\b", "32200", "Enrolled/Assistant nurse", None, true),
    ("rule_nursing_aide", r"\b(nursing\s+aides?|healthcare\s+as+is+t[ae]nts?)\b", "53201", "Healthcare assistant", None, true),
    ("rule_nurse_exact", r"(^\s*nurse?s?\s*$|clinic\s+nurse)", "22200", "Registered nurse and related nursing professional (excluding enrolled nurse)", None, true),
    ("rule_clinic_manager", r"clinic\s+(manager|ma+nger|mgr|mgt)", "13420", "Health services manager", None, true),
    ("rule_clinic_assistant", r"clinic\s+(as+is+tant|as+t)", "42243", "Medical/Dental receptionist", None, true),

    // project, operations, coordination
    ("rule_project_officer", r"\bpro?j[e]?ct\s+of+icers?\b", "24213", "Business/Financial project management professional", None, true),
    ("rule_project_coord", r"\bpro?j[e]?ct\s+co?ordinators?\b", "13299", "Other production/operations manager n.e.c.", None, true),
    ("rule_project_manager", r"\bpro?j[e]?ct\s+man[ae]?gers?\b", "13299", "Other production/operations manager n.e.c.", None, true),
    ("rule_ops_manager", r"\bop[e]?rat?ions?\s+man[ae]?gers?\b", "13299", "Other production/operations manager n.e.c.", None, true),
    ("rule_manager_exact", r"^(manager|ma+nger)$", "12112", "Administration manager", None, true),

    // c-suite
    ("rule_cfo", r"\b(chi[ei]f\s+finan[cs]ial\s+of+icers?|cfo)\b", "12111", "Budgeting/Financial accounting manager", None, true),
    ("rule_cto", r"\b(chi[ei]f\s+techn?ology\s+of+icers?|cto)\b", "13301", "Chief information officer/Chief technology officer/Chief information security officer", None, true),
    ("rule_director_exact", r"^director$", "11201", "Managing director/Chief executive officer", None, true),
    ("rule_ceo_md", r"\b(man[ae]?ging\s+directors?|chi[ei]f\s+exec(utive)?s?\s+of+icers?|ceo)\b", "11201", "Managing director/Chief executive officer", None, true),
    ("rule_coo_director", r"\b(chi[ei]f\s+op[e]?rat?ing\s+of+icers?|coo)\b", "11203", "Chief operating officer/General manager", None, true),
    ("rule_general_manager", r"\bgeneral\s+(ma+nger|man[ae]?gers?)\b", "11203", "Chief operating officer/General manager", None, true),

    ("rule_public_relations", r"\bpubl?ic\s+rea?l+a?ti?ons?\b", "24320", "Public relations/Corporate communications professional", None, true),

    // it, web
    ("rule_web_admin", r"\b(web\s*sites?\s*admin?is?tr[ae]tors?|webm[ae]st[ae]?rs?)\b", "35140", "Website administrator/Webmaster", None, true),
    ("rule_it_support", r"\b(it\s+sup+o?rts?|(it|techn?i?c?al|comp?ut[ae]?rs?)\s+help\s*desks?|desktops?\s+sup+o?rts?)\b", "35123", "IT support technician", None, true),

    // finance, accounts
    ("rule_exec_accountant", r"\b(exec(utive)?s?\s+ac+ou?nt[ae]nts?|financial\s+exec(utive)?s?)\b", "24111", "Accountant (General)", None, true),
    ("rule_accounts_and_other_exec", r"\bac+ou?nts?.*\bexec(utive)?s?\b", "24111", "Accountant (General)", None, true),
    ("rule_accountant_exact", r"^\s*ac+ou?nt[ae]nts?\s*$", "24111", "Accountant (General)", None, true),
    ("rule_asst_accountant_exec", r"\b(as+is+t[ae]nts?\s*ac+ou?nt[ae]nts?|ac+ou?nts?\s*as+is+t[ae]nts?)\s+exec(utive)?s?\b", "33131", "Assistant accountant", None, true),
    ("rule_asst_accountant", r"\b(as+is+t[ae]nts?\s*ac+ou?nt[ae]nts?|ac+ou?nts?\s*as+is+t[ae]nts?)\b", "33131", "Assistant accountant", None, true),
    ("rule_finance_manager", r"\bfinan[cs]e\s+man[ae]?gers?\b", "12111", "Budgeting/Financial accounting manager", None, true),
    ("rule_account_manager", r"\b(ac+ou?nts?|ac+t)\s+man[ae]?gers?\b", "12211", "Sales manager", None, true),
    ("rule_accounting_manager", r"\b(ac+ou?nti?ng)\s+(man[ae]?gers?|maanger)\b", "12111", "Budgeting/Financial accounting manager", None, true),

    // food and beverage, basic services
    ("rule_cook", r"\bco+k\b", "51201", "Cook", None, true),
    ("rule_chef", r"\bchef\b", "34341", "Chef (excluding pastry chef)", None, true),
    ("rule_coffeemaker_stall", r"\bcof+e+\s*mak[ae]?rs?\b", "94102", "Food/Drink stall assistant", None, true),
    ("rule_barista", r"\bbaristas?\b", "51321", "Barista", None, true),
    ("rule_waiter", r"\b(wait[ae]?rs?|waitres+es?|s[eia]rvice\s+crew)\b", "51312", "Waiter/Waitress", None, true),
    ("rule_security", r"\bsec[ue]rity\s+(gua?rds?|of+icers?)\b", "54144", "Security officer", None, true),
    ("rule_dishwasher", r"\b(dish\s+washer|dishwasher)\b", "91153", "Dishwasher", None, true),
    ("rule_food_processor", r"food\s+(proc+es+ing|proc+[eo]s+[eo]r)", "75190", "Food processing and related trades worker n.e.c.", None, true),

    ("rule_massage_therapist", r"\bmas+eur|mas+euse?|mas+age\b", "32551", "Massage therapist", None, true),

    ("rule_religious_professional", r"\b(past[oe]rs?|pr[ie]{2}sts?|rev(er[ae]nd)?|im[ae]ms?|monks?|clerg[ey])\b", "26369", "Religious professional", None, true),

    // admin and office catch-alls last
    ("rule_admin_office_manager", r"\b(of+ice|admin|administ(r?)[ai]tive)\s+man[ae]?gers?\b", "12112", "Administration/Office manager", None, true),
    ("rule_admin_exec", r"\b(admin|administ(r?)[ai]tive)\s+(exec(utive)?s?|of+icers?)\b", "41101", "General office clerk", Some(r"\bexec(utive)?s?\b"), true),
    ("rule_admin_asst", r"\b(admin|administ(r?)[ai]tive)\s+(as+is+t[ae]nts?)\b", "41101", "General office clerk", None, true),
    ("rule_admin_clerk", r"\b(admin|administ(r?)[ai]tive)\s+cl[ei]rks?\b", "41101", "General office clerk", None, true),
    ("rule_admin_worker", r"\b(administ(r?)[ai]tive|admin)\s+work[ae]?rs?\b", "41101", "General office clerk", None, true),
    ("rule_admin_work_exact", r"^\s*(administ(r?)[ai]tive|admin)\s+work\s*$", "41101", "General office clerk", None, true),
    ("rule_admin_exact", r"^\s*(admin|admin?i?stration|admin?i?strator|admi?ni?strati?on)\s*$", "41101", "General office clerk", None, true),
    ("rule_receptionist", r"\brec[ei]ptionists?\b", "42261", "Receptionist", None, true),
    ("rule_admin_general_catch", r"\b(admin|administ(r?)[ai]tive)\b", "41101", "General office clerk", None, true),
    ("rule_clerk_exact", r"^\s*cl[ei]rks?\s*$", "41101", "General office clerk", None, true),
    ("rule_personal_assistant_pa", r"\b(p[ae]?rson[ae]ls?\s+as+is+t[ae]nts?|pa)\b", "33494", "Executive secretary", None, true),
    ("rule_ops_exec", r"\b(ope?rati?ons|ops)\s+(exe?cu?ti?ve?|exec.?)\b", "33492", "Operations officer (administrative)", None, true),
];

impl RuleSet {
    /// The shipped decision table plus the compound rules.
    pub fn builtin() -> Result<Self, ConfigurationError> {
        let specs: Vec<RuleSpec> = BUILTIN_RULES
            .iter()
            .map(|(id, pattern, code, title, context, title_only)| RuleSpec {
                id: id.to_string(),
                pattern: pattern.to_string(),
                code: code.to_string(),
                title: title.to_string(),
                context: context.map(str::to_string),
                title_only: *title_only,
            })
            .collect();
        Ok(Self::from_specs(&specs)?.with_compound_rules(true))
    }

    /// A table of custom rules, in the given order, without the compound rules.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self, ConfigurationError> {
        let rules = specs.iter().map(Rule::compile).collect::<Result<Vec<_>, _>>()?;
        debug!(target: "occupation", rules = rules.len(), "rule table compiled");
        Ok(Self {
            rules,
            compound: false,
        })
    }

    /// `[{"id": ..., "pattern": ..., "code": ..., "title": ...}, ...]`
    pub fn from_json_str(s: &str) -> Result<Self, ConfigurationError> {
        let specs: Vec<RuleSpec> = serde_json::from_str(s)?;
        Self::from_specs(&specs)
    }

    pub fn with_compound_rules(mut self, enabled: bool) -> Self {
        self.compound = enabled;
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Both arguments must already be normalized; `both_norm` is
    /// `title + " " + duties`.
    pub fn evaluate(&self, title_norm: &str, both_norm: &str) -> Option<RuleMatch> {
        if let Some(rule) = self.rules.iter().find(|r| r.fires(title_norm, both_norm)) {
            return Some(RuleMatch::new(&rule.code, &rule.title, &rule.id));
        }
        if self.compound {
            return compound_rules(title_norm, both_norm);
        }
        None
    }
}

/// Combinations the single-pattern table cannot express. The role keyword is
/// read from the title so duties mentioning a senior role do not promote a
/// junior record.
fn compound_rules(title_norm: &str, both_norm: &str) -> Option<RuleMatch> {
    let construction = CONSTRUCTION_LABOUR_CUES.is_match(both_norm);

    if title_norm.contains("supervisor") && construction {
        return Some(RuleMatch::new(
            "83000",
            "Mobile machinery supervisor/general foreman",
            "rule_supervisor_construction",
        ));
    }
    if title_norm.contains("manager") && construction {
        return Some(RuleMatch::new(
            "13299",
            "Other production/operations manager n.e.c.",
            "rule_manager_construction",
        ));
    }

    let drawings = DRAFTER_CUES.is_match(both_norm)
        || both_norm.contains("layout")
        || both_norm.contains("technical drawing");
    let civil = construction
        || ["civil", "structural", "construction"]
            .iter()
            .any(|k| both_norm.contains(k));
    if title_norm.contains("engineer") && drawings && civil {
        return Some(RuleMatch::new(
            "21421",
            "Civil engineer",
            "rule_engineer_drawings_construction",
        ));
    }

    if DRAFTER_TITLE.is_match(title_norm) && !title_norm.contains("engineer") {
        let tokens = token_set(both_norm);
        return Some(match route_discipline(&DRAFTER_DISCIPLINES, both_norm, &tokens) {
            Some(d) => RuleMatch::new(d.code, d.title, "rule_drafter_routed"),
            None => RuleMatch::new(
                GENERAL_DRAFTER_CODE,
                GENERAL_DRAFTER_TITLE,
                "rule_drafter_general",
            ),
        });
    }

    if both_norm.contains("painter") {
        return Some(if VEHICLE_CUES.is_match(both_norm) {
            RuleMatch::new("71322", "Motor vehicle spray painter", "rule_painter_vehicle")
        } else {
            RuleMatch::new("71311", "House/Building painter", "rule_painter_building")
        });
    }
    None
}
