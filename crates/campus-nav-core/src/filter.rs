// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::model::{Department, TypeFilter};

/// Departments matching both the search text and the type filter, in input order.
///
/// Search is a case-insensitive substring match on name or code; blank
/// search text matches everything. Recomputed from scratch on every call.
pub fn filter_departments(
    departments: &[Department],
    search_text: &str,
    type_filter: TypeFilter,
) -> Vec<Department> {
    let query = search_text.trim().to_lowercase();
    departments
        .iter()
        .filter(|d| type_filter.matches(d.kind) && matches_text(d, &query))
        .cloned()
        .collect()
}

/// `query` must already be trimmed and lowercased.
fn matches_text(dept: &Department, query: &str) -> bool {
    query.is_empty()
        || dept.name.to_lowercase().contains(query)
        || dept.code.to_lowercase().contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data::campus_departments;
    use crate::model::DepartmentType;

    fn ids(list: &[Department]) -> Vec<&str> {
        list.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_empty_search_and_all_returns_everything_in_order() {
        let depts = campus_departments();
        let out = filter_departments(&depts, "", TypeFilter::All);
        assert_eq!(out, depts);

        let out = filter_departments(&depts, "   \t", TypeFilter::All);
        assert_eq!(out.len(), depts.len());
    }

    #[test]
    fn test_search_matches_name_or_code_case_insensitively() {
        let depts = campus_departments();
        assert_eq!(ids(&filter_departments(&depts, "block", TypeFilter::All)), vec!["1", "2", "4", "5"]);
        assert_eq!(ids(&filter_departments(&depts, "mech", TypeFilter::All)), vec!["6"]);
        assert_eq!(ids(&filter_departments(&depts, "  sH ", TypeFilter::All)), vec!["3"]);
        assert!(filter_departments(&depts, "library", TypeFilter::All).is_empty());
    }

    #[test]
    fn test_type_filter_is_anded_with_search() {
        let depts = campus_departments();
        let eng = TypeFilter::Only(DepartmentType::Engineering);
        assert_eq!(ids(&filter_departments(&depts, "", eng)), vec!["1", "2", "6", "7"]);
        assert_eq!(ids(&filter_departments(&depts, "block", eng)), vec!["1", "2"]);
        assert!(filter_departments(&depts, "mba", eng).is_empty());
    }

    #[test]
    fn test_every_result_satisfies_both_predicates() {
        let depts = campus_departments();
        let queries = ["", "b", "DEPT", "it", "ci", "zz", "&"];
        let mut filters = vec![TypeFilter::All];
        filters.extend(DepartmentType::ALL.iter().map(|k| TypeFilter::Only(*k)));

        for q in queries {
            for f in &filters {
                let out = filter_departments(&depts, q, *f);
                let needle = q.trim().to_lowercase();
                for d in &out {
                    assert!(depts.contains(d));
                    assert!(f.matches(d.kind));
                    assert!(
                        d.name.to_lowercase().contains(&needle)
                            || d.code.to_lowercase().contains(&needle)
                    );
                }
                // Nothing that matches is left out
                let expected = depts
                    .iter()
                    .filter(|d| {
                        f.matches(d.kind)
                            && (d.name.to_lowercase().contains(&needle)
                                || d.code.to_lowercase().contains(&needle))
                    })
                    .count();
                assert_eq!(out.len(), expected, "query={:?} filter={}", q, f);
            }
        }
    }
}
