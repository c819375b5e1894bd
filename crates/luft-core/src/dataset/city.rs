/// Cities whose arrondissements are reported as separate entries in the
/// export and collapsed to the parent city.
const ARRONDISSEMENT_CITIES: [&str; 3] = ["PARIS", "MARSEILLE", "LYON"];

/// Normalize a city cell to a canonical uppercase name.
///
/// Collapses arrondissement entries ("PARIS 12E ARRONDISSEMENT",
/// "LYON 3EME") to their parent city.
pub fn normalize_city(raw: &str) -> String {
    let city = raw.trim().to_uppercase();
    for parent in ARRONDISSEMENT_CITIES {
        if city.contains(parent)
            && (city.contains("ARRONDISSEMENT") || city.starts_with(&format!("{} ", parent)))
        {
            return parent.to_string();
        }
    }
    city
}

/// Filter out entries that are monitoring-network codes rather than city
/// names ("FR01001", "ATMO GRAND EST", "NET-FR123").
pub fn is_valid_city(city: &str) -> bool {
    let city = city.trim();
    if city.is_empty() {
        return false;
    }
    let bytes = city.as_bytes();
    if bytes.len() > 2 && city.starts_with("FR") && bytes[2].is_ascii_digit() {
        return false;
    }
    if city.starts_with("ATMO") {
        return false;
    }
    if city.contains("NET-") {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrondissement_collapsed() {
        assert_eq!(normalize_city("PARIS 12E ARRONDISSEMENT"), "PARIS");
        assert_eq!(normalize_city("Marseille 2e Arrondissement"), "MARSEILLE");
        assert_eq!(normalize_city("LYON 3EME"), "LYON");
    }

    #[test]
    fn test_plain_city_uppercased() {
        assert_eq!(normalize_city("Toulouse"), "TOULOUSE");
        assert_eq!(normalize_city("  nice "), "NICE");
    }

    #[test]
    fn test_network_codes_rejected() {
        assert!(!is_valid_city("FR01001"));
        assert!(!is_valid_city("ATMO GRAND EST"));
        assert!(!is_valid_city("NET-FR123"));
        assert!(!is_valid_city(""));
    }

    #[test]
    fn test_real_cities_accepted() {
        assert!(is_valid_city("PARIS"));
        assert!(is_valid_city("FREJUS"));
        assert!(is_valid_city("STRASBOURG"));
    }
}
