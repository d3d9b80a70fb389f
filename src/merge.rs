use std::collections::HashMap;

/// Lossy snapshot of the process environment, taken once per lookup.
pub(crate) fn system_snapshot() -> HashMap<String, String> {
    std::env::vars_os()
        .map(|(key, value)| {
            (
                key.to_string_lossy().into_owned(),
                value.to_string_lossy().into_owned(),
            )
        })
        .collect()
}

/// Full-set mode: union of file and system variables.
///
/// A system entry wins a key collision only when `system_first` is set.
pub(crate) fn merge_all(
    file_vars: HashMap<String, String>,
    system: &HashMap<String, String>,
    system_first: bool,
) -> HashMap<String, String> {
    let mut merged = file_vars;

    for (key, value) in system {
        if system_first || !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }

    merged
}

/// Selective mode: resolves each requested name independently and
/// collects the ones found nowhere, in request order.
pub(crate) fn select(
    requested: &[String],
    file_vars: &HashMap<String, String>,
    system: &HashMap<String, String>,
    system_first: bool,
) -> (HashMap<String, String>, Vec<String>) {
    let mut variables = HashMap::new();
    let mut not_found = Vec::new();

    for name in requested {
        let mut found = false;

        // An empty system value counts as absent for precedence.
        if let Some(value) = system.get(name).filter(|value| !value.is_empty()) {
            variables.insert(name.clone(), value.clone());
            if system_first {
                continue;
            }
            found = true;
        }

        if let Some(value) = file_vars.get(name) {
            variables.insert(name.clone(), value.clone());
            continue;
        }

        if !found {
            not_found.push(name.clone());
        }
    }

    (variables, not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn merge_all_file_wins_by_default() {
        let file_vars = map(&[("OPTION_A", "1")]);
        let system = map(&[("OPTION_A", "999"), ("OPTION_Z", "8")]);

        let merged = merge_all(file_vars, &system, false);
        assert_eq!(merged.get("OPTION_A").unwrap(), "1");
        assert_eq!(merged.get("OPTION_Z").unwrap(), "8");
    }

    #[test]
    fn merge_all_system_first() {
        let file_vars = map(&[("OPTION_A", "1")]);
        let system = map(&[("OPTION_A", "999")]);

        let merged = merge_all(file_vars, &system, true);
        assert_eq!(merged.get("OPTION_A").unwrap(), "999");
    }

    #[test]
    fn select_file_overrides_system_by_default() {
        let file_vars = map(&[("OPTION_A", "1")]);
        let system = map(&[("OPTION_A", "999")]);

        let (variables, not_found) =
            select(&names(&["OPTION_A"]), &file_vars, &system, false);
        assert_eq!(variables.get("OPTION_A").unwrap(), "1");
        assert!(not_found.is_empty());
    }

    #[test]
    fn select_system_first_is_final() {
        let file_vars = map(&[("OPTION_A", "1")]);
        let system = map(&[("OPTION_A", "999")]);

        let (variables, not_found) =
            select(&names(&["OPTION_A"]), &file_vars, &system, true);
        assert_eq!(variables.get("OPTION_A").unwrap(), "999");
        assert!(not_found.is_empty());
    }

    #[test]
    fn select_reports_missing_names_in_request_order() {
        let file_vars = map(&[("PRESENT", "yes")]);
        let system = HashMap::new();

        let (variables, not_found) = select(
            &names(&["MISSING_B", "PRESENT", "MISSING_A"]),
            &file_vars,
            &system,
            false,
        );
        assert_eq!(variables.len(), 1);
        assert_eq!(not_found, names(&["MISSING_B", "MISSING_A"]));
    }

    #[test]
    fn select_treats_empty_system_value_as_absent() {
        let file_vars = HashMap::new();
        let system = map(&[("EMPTY", "")]);

        let (variables, not_found) = select(&names(&["EMPTY"]), &file_vars, &system, false);
        assert!(variables.is_empty());
        assert_eq!(not_found, names(&["EMPTY"]));
    }

    #[test]
    fn select_empty_system_value_still_loses_to_file() {
        let file_vars = map(&[("EMPTY", "from file")]);
        let system = map(&[("EMPTY", "")]);

        let (variables, not_found) = select(&names(&["EMPTY"]), &file_vars, &system, true);
        assert_eq!(variables.get("EMPTY").unwrap(), "from file");
        assert!(not_found.is_empty());
    }
}
