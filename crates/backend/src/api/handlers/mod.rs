pub mod a001_company;
pub mod a002_app_user;
pub mod a003_tool;
pub mod a004_rental_agreement;

/// Разбор параметра relations: список связей через запятую.
/// Пустые и повторные элементы отбрасываются без ошибки.
pub(crate) fn parse_relations(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let mut relations: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if !relations.iter().any(|r| r == part) {
            relations.push(part.to_string());
        }
    }
    relations
}

#[cfg(test)]
mod tests {
    use super::parse_relations;

    #[test]
    fn relations_are_split_and_deduplicated() {
        assert_eq!(
            parse_relations(Some("tool,user,tool")),
            vec!["tool".to_string(), "user".to_string()]
        );
    }

    #[test]
    fn empty_relations_yield_nothing() {
        assert!(parse_relations(None).is_empty());
        assert!(parse_relations(Some("")).is_empty());
        assert!(parse_relations(Some(" , ,")).is_empty());
    }
}
