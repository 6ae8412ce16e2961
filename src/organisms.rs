use regex::Regex;
use std::sync::OnceLock;

/// Organisms whose intron databases are provisioned, in ID-range order.
///
/// Position in this list decides the increment, so entries must only ever be
/// appended.
pub const ORGANISMS: [&str; 30] = [
    "Ailuropoda_melanoleuca",
    "Ananas_comosus",
    "Apis_florea",
    "Asparagus_officinalis",
    "Cajanus_cajan",
    "Camelus_bactrianus",
    "Cariama_cristata",
    "Chaetura_pelagica",
    "Colius_striatus",
    "Columba_livia",
    "Corvus_cornix",
    "Drosophila_eugracilis",
    "Drosophila_melanogaster",
    "Egretta_garzetta",
    "Equus_przewalskii",
    "Falco_cherrug",
    "Falco_peregrinus",
    "Latimeria_chalumnae",
    "Maylandia_zebra",
    "Melopsittacus_undulatus",
    "Microcebus_murinus",
    "Oncorhynchus_kisutch",
    "Otolemur_garnettii",
    "Parasteatoda_tepidariorum",
    "Pelodiscus_sinensis",
    "Picoides_pubescens",
    "Prunus_persica",
    "Solanum_tuberosum",
    "Tupaia_chinensis",
    "Tyto_alba",
];

/// Width of the ID range reserved for each organism
pub const INCREMENT_STEP: u64 = 5_000_000;

/// Increment for the organism at a 1-based list position
pub fn increment_for(position: usize) -> u64 {
    position as u64 * INCREMENT_STEP
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("identifier pattern is valid"))
}

/// Names that are not plain SQL/shell-safe identifiers.
///
/// Only used for reporting; such names are still emitted verbatim.
pub fn suspicious_identifiers<'a, S: AsRef<str>>(organisms: &'a [S]) -> Vec<&'a str> {
    organisms
        .iter()
        .map(|o| o.as_ref())
        .filter(|name| !identifier_pattern().is_match(name))
        .collect()
}
