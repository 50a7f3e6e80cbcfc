//! Built-in reference tables
//!
//! Region 02 (Valle d'Aosta) municipalities and network nodes, the national
//! region list, the documented unit status codes and the named filter presets.

/// Region code -> display name
pub const REGIONS: &[(&str, &str)] = &[
    ("01", "Piemonte"),
    ("02", "Valle d'Aosta"),
    ("03", "Lombardia"),
    ("04", "Trentino-Alto Adige"),
    ("05", "Veneto"),
    ("06", "Friuli-Venezia Giulia"),
    ("07", "Liguria"),
    ("08", "Emilia-Romagna"),
    ("09", "Toscana"),
    ("10", "Umbria"),
    ("11", "Marche"),
    ("12", "Lazio"),
    ("13", "Abruzzo"),
    ("14", "Molise"),
    ("15", "Campania"),
    ("16", "Puglia"),
    ("17", "Basilicata"),
    ("18", "Calabria"),
    ("19", "Sicilia"),
    ("20", "Sardegna"),
];

/// Municipality code -> display name (region 02)
pub const MUNICIPALITIES: &[(&str, &str)] = &[
    ("007001", "Allein"),
    ("007002", "Antey-Saint-André"),
    ("007003", "Aosta"),
    ("007004", "Arnad"),
    ("007005", "Arvier"),
    ("007006", "Avise"),
    ("007007", "Ayas"),
    ("007008", "Aymavilles"),
    ("007009", "Bard"),
    ("007010", "Bionaz"),
    ("007011", "Brissogne"),
    ("007012", "Brusson"),
    ("007013", "Challand-Saint-Anselme"),
    ("007014", "Challand-Saint-Victor"),
    ("007015", "Chambave"),
    ("007016", "Chamois"),
    ("007017", "Champdepraz"),
    ("007018", "Champorcher"),
    ("007019", "Charvensod"),
    ("007020", "Châtillon"),
    ("007021", "Cogne"),
    ("007022", "Courmayeur"),
    ("007023", "Donnas"),
    ("007024", "Doues"),
    ("007025", "Emarèse"),
    ("007026", "Etroubles"),
    ("007027", "Fénis"),
    ("007028", "Fontainemore"),
    ("007029", "Gaby"),
    ("007030", "Gignod"),
    ("007031", "Gressan"),
    ("007032", "Gressoney-La-Trinité"),
    ("007033", "Gressoney-Saint-Jean"),
    ("007034", "Hône"),
    ("007035", "Introd"),
    ("007036", "Issime"),
    ("007037", "Issogne"),
    ("007038", "Jovençan"),
    ("007039", "La Magdeleine"),
    ("007040", "La Salle"),
    ("007041", "La Thuile"),
    ("007042", "Lillianes"),
    ("007043", "Montjovet"),
    ("007044", "Morgex"),
    ("007045", "Nus"),
    ("007046", "Ollomont"),
    ("007047", "Oyace"),
    ("007048", "Perloz"),
    ("007049", "Pollein"),
    ("007050", "Pontboset"),
    ("007051", "Pontey"),
    ("007052", "Pont-Saint-Martin"),
    ("007053", "Pré-Saint-Didier"),
    ("007054", "Quart"),
    ("007055", "Rhêmes-Notre-Dame"),
    ("007056", "Rhêmes-Saint-Georges"),
    ("007057", "Roisan"),
    ("007058", "Saint-Christophe"),
    ("007059", "Saint-Denis"),
    ("007060", "Saint-Marcel"),
    ("007061", "Saint-Nicolas"),
    ("007062", "Saint-Oyen"),
    ("007063", "Saint-Pierre"),
    ("007064", "Saint-Rhémy-en-Bosses"),
    ("007065", "Saint-Vincent"),
    ("007066", "Sarre"),
    ("007067", "Torgnon"),
    ("007068", "Valgrisenche"),
    ("007069", "Valpelline"),
    ("007070", "Valsavarenche"),
    ("007071", "Valtournenche"),
    ("007072", "Verrayes"),
    ("007073", "Verrès"),
    ("007074", "Villeneuve"),
];

/// Network nodes serving region 02: (id, name, municipality, latitude, longitude)
pub const NODES: &[(&str, &str, &str, f64, f64)] = &[
    ("AOCUA", "POP_AO_11_VERRES", "Verrès", 45.661442, 7.69103),
    ("AOAGA", "POP_AO_07_DONNAS", "Donnas", 45.603989, 7.775326),
    ("AOALA", "POP_AO_04_AYAS", "Ayas", 45.797209, 7.695367),
    ("AOCCA", "POP_AO_09_RHEMES_NOTRE_DAMES", "Rhêmes-Notre-Dame", 45.578314, 7.122699),
    ("AOBJ1", "POP_AO_27_ISSIME", "Issime", 45.684445, 7.854775),
    ("AOAZ1", "POP_AO_16_EMARÈSE", "Emarèse", 45.731543, 7.715043),
    ("AOBXA", "POP_AO_28_PONTBOSET", "Pontboset", 45.606504, 7.687544),
    ("AOBPA", "POP_AO_26_LILLIANES", "Lillianes", 45.633319, 7.845082),
    ("AOBVA", "POP_AO_24_PERLOZ", "Perloz", 45.604174, 7.803198),
    ("AOBMA", "POP_AO_18_LA_MAGDELEINE", "La Magdeleine", 45.811125, 7.619954),
    ("AOARA", "POP_AO_25_CHAMBAVE", "Chambave", 45.744122, 7.547691),
    ("AOCEA", "POP_AO_01_ROISAN", "Roisan", 45.783543, 7.308608),
    ("AOAWA", "POP_AO_02_CHATILLON", "Châtillon", 45.74542, 7.609981),
    ("AOAUA", "POP_AO_29_CHAMPORCHER", "Champorcher", 45.622629, 7.636796),
    ("AOBYA", "POP_AO_34_PONTEY", "Pontey", 45.738504, 7.59147),
    ("AOBGA", "POP_AO_22_GRESSONEY-LA-TRINITÈ", "Gressoney-La-Trinité", 45.826537, 7.825449),
    ("AOBDA", "POP_AO_19_GABY", "Gaby", 45.714555, 7.881129),
    ("AOAXA", "POP_AO_14_COGNE", "Cogne", 45.611333, 7.350789),
    ("AOAFA", "POP_AO_08_GRESSONEY_SAINT_JEAN", "Gressoney-Saint-Jean", 45.774432, 7.825705),
    ("AOBIA", "POP_AO_35_INTROD", "Introd", 45.696833, 7.187801),
    ("AOCIA", "POP_AO_32_SAINT-NICOLAS", "Saint-Nicolas", 45.709708, 7.198002),
    ("AOAJA", "POP_AO_33_ARVIER", "Arvier", 45.703663, 7.16933),
    ("AOAHA", "POP_AO_48_ALLEIN", "Allein", 45.80852, 7.271741),
    ("AOCGA", "POP_AO_49_SAINT_DENIS", "Saint-Denis", 45.75249, 7.556964),
    ("AOCQA", "POP_AO_42_VALPELLINE", "Valpelline", 45.826005, 7.323694),
    ("AOANA", "POP_AO_43_BIONAZ", "Bionaz", 45.864615, 7.398061),
    ("AOBUA", "POP_AO_47_OYACE", "Oyace", 45.85057, 7.381835),
    ("AOCKA", "POP_AO_03_SAINT_PIERRE", "Saint-Pierre", 45.708333, 7.222765),
    ("AOABA", "POP_AO_36_ANTEY_SAINT_ANDRE", "Antey-Saint-André", 45.806803, 7.587768),
    ("AOASA", "POP_AO_30_CHAMOIS", "Chamois", 45.83726, 7.623829),
    ("AOBSA", "POP_AO_44_NUS", "Nus", 45.740152, 7.466732),
    ("AOCHA", "POP_AO_51_SAINT_MARCEL", "Saint-Marcel", 45.731502, 7.444186),
    ("AOBAA", "POP_AO_40_ETROUBLES", "Etroubles", 45.821179, 7.229843),
    ("AOCLA", "POP_AO_41_SAINT-RHÈMY-EN-BOSSES", "Saint-Rhémy-en-Bosses", 45.821056, 7.178117),
    ("AOAVA", "POP_AO_46_CHARVENSOD", "Charvensod", 45.727882, 7.333152),
    ("AOCPA", "POP_AO_10_VALGRISENCHE", "Valgrisenche", 45.637025, 7.068104),
    ("AOACA", "POP_AO_31_AYMAVILLES", "Aymavilles", 45.701166, 7.239455),
    ("AOBWA", "POP_AO_50_POLLEIN", "Pollein", 45.728804, 7.3572),
    ("AOBOA", "POP_AO_13_LA_THUILE", "La Thuile", 45.713989, 6.950893),
    ("AOAYA", "POP_AO_52_DOUES", "Doues", 45.816728, 7.305688),
    ("AOCBA", "POP_AO_15_QUART", "Quart", 45.743229, 7.387108),
    ("AOBFA", "POP_AO_45_GRESSAN", "Gressan", 45.721333, 7.289556),
];

/// Documented unit status codes and their descriptions
pub const STATUSES: &[(&str, &str)] = &[
    ("101", "FTTH site - not sellable"),
    ("102", "FTTH site"),
    ("201", "FWA site - not sellable"),
    ("202", "FWA site"),
    ("205", "FWA site - transitional"),
    ("302", "Public administration site (PAC/PAL)"),
    ("80", "Presale"),
    ("602", "FTTH - easy delivery"),
    ("603", "FTTH - future use"),
    ("604", "FTTH - future use"),
    ("902", "FWA - future use"),
    ("905", "FWA - future use"),
];

/// Key of the preset covering every documented status
pub const ALL_STATES_PRESET: &str = "all-states";

/// Named status filters: (key, description, codes)
pub const FILTER_PRESETS: &[(&str, &str, &[&str])] = &[
    ("ftth-sellable", "Sellable FTTH sites", &["102"]),
    ("ftth-all", "All FTTH sites, sellable or not", &["101", "102"]),
    ("fwa-sellable", "Sellable FWA sites", &["202"]),
    ("fwa-all", "All FWA sites", &["201", "202", "205"]),
    ("public-sites", "Public administration sites", &["302"]),
    ("presale", "Sites in presale", &["80"]),
    ("easy-delivery", "FTTH easy delivery", &["602"]),
    ("future-use", "Sites planned for future use", &["603", "604", "902", "905"]),
    ("sellable-all", "Every sellable site (FTTH, FWA, PAC/PAL)", &["102", "202", "302"]),
];
