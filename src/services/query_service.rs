use serde::{Deserialize, Serialize};

use crate::models::candidate::{CandidateRecord, PLACEHOLDER};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub name: Option<String>,
    pub qualification: Option<String>,
    pub location: Option<String>,
    pub occupation_status: Option<String>,
    pub age: Option<String>,
}

impl FilterSpec {
    fn search_term(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    fn age_value(&self) -> Option<u32> {
        self.age.as_deref().and_then(|a| a.trim().parse().ok())
    }

    fn matches(&self, candidate: &CandidateRecord, term: Option<&str>, age: Option<u32>) -> bool {
        fn exact(wanted: &Option<String>, actual: &str) -> bool {
            match wanted.as_deref() {
                None | Some("") => true,
                Some(w) => w == actual,
            }
        }

        term.map_or(true, |t| candidate.name.to_lowercase().contains(t))
            && exact(&self.qualification, &candidate.qualification)
            && exact(&self.location, &candidate.location)
            && exact(&self.occupation_status, &candidate.occupation_status)
            && age.map_or(true, |a| candidate.age == a)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl<T> PageResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub qualifications: Vec<String>,
    pub locations: Vec<String>,
    pub occupation_statuses: Vec<String>,
    pub ages: Vec<u32>,
}

pub struct QueryService;

impl QueryService {
    /// Filters in storage order and slices out one page. Pages past the end are
    /// empty, never an error.
    pub fn query(
        candidates: &[CandidateRecord],
        filter: &FilterSpec,
        page: usize,
        page_size: usize,
    ) -> PageResult<CandidateRecord> {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let term = filter.search_term();
        let age = filter.age_value();

        let filtered: Vec<&CandidateRecord> = candidates
            .iter()
            .filter(|c| filter.matches(c, term.as_deref(), age))
            .collect();

        let total_elements = filtered.len();
        let total_pages = total_elements.div_ceil(page_size).max(1);
        let start = (page - 1).saturating_mul(page_size);

        let items = filtered
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        PageResult {
            items,
            total_elements,
            total_pages,
            current_page: page,
            page_size,
        }
    }

    pub fn derive_filter_options(candidates: &[CandidateRecord]) -> FilterOptions {
        fn push_distinct(list: &mut Vec<String>, value: &str) {
            if value.is_empty() || value == PLACEHOLDER {
                return;
            }
            if !list.iter().any(|v| v == value) {
                list.push(value.to_string());
            }
        }

        let mut options = FilterOptions::default();
        for c in candidates {
            push_distinct(&mut options.qualifications, &c.qualification);
            push_distinct(&mut options.locations, &c.location);
            push_distinct(&mut options.occupation_statuses, &c.occupation_status);
            if c.age > 0 && !options.ages.contains(&c.age) {
                options.ages.push(c.age);
            }
        }
        options.ages.sort_unstable();
        options
    }
}

/// Filter, search and page position of one list view.
///
/// Any change to the filters or the committed search term sends the view back
/// to page 1, so a stale page number from a larger result set is never sliced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub filter: FilterSpec,
    pub page: usize,
    pub page_size: usize,
}

impl QueryState {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: FilterSpec::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replaces the exact-match and age filters, keeping the committed search term.
    pub fn apply_filter(&mut self, filter: FilterSpec) {
        let next = FilterSpec {
            name: self.filter.name.clone(),
            ..filter
        };
        if next != self.filter {
            self.filter = next;
            self.page = 1;
        }
    }

    pub fn apply_search(&mut self, term: Option<String>) {
        if self.filter.name != term {
            self.filter.name = term;
            self.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page = 1;
        }
    }

    pub fn clear(&mut self) {
        self.filter = FilterSpec::default();
        self.page = 1;
    }

    pub fn run(&self, candidates: &[CandidateRecord]) -> PageResult<CandidateRecord> {
        QueryService::query(candidates, &self.filter, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn candidate(name: &str, age: u32, qualification: &str, location: &str, status: &str) -> CandidateRecord {
        CandidateRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            age,
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            mobile: "9876543210".to_string(),
            qualification: qualification.to_string(),
            location: location.to_string(),
            occupation_status: status.to_string(),
            resume: None,
            id_proof: None,
            registration_date: NaiveDate::from_ymd_opt(2023, 8, 15).unwrap(),
            updated_at: None,
            password_hash: String::new(),
        }
    }

    fn many(count: usize) -> Vec<CandidateRecord> {
        (0..count)
            .map(|i| candidate(&format!("Person {}", i), 20 + (i as u32 % 5), "Graduate", "delhi", "Available"))
            .collect()
    }

    #[test]
    fn name_search_is_case_insensitive_substring() {
        let list = vec![
            candidate("Alice", 25, "Graduate", "delhi", "Available"),
            candidate("Bob", 30, "12th", "karnataka", "Not Available"),
        ];
        let filter = FilterSpec {
            name: Some("ali".into()),
            ..FilterSpec::default()
        };
        let page = QueryService::query(&list, &filter, 1, 10);
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Alice");

        let blank = FilterSpec {
            name: Some("   ".into()),
            ..FilterSpec::default()
        };
        assert_eq!(QueryService::query(&list, &blank, 1, 10).total_elements, 2);
    }

    #[test]
    fn exact_filters_intersect_and_keep_storage_order() {
        let list = vec![
            candidate("Zed", 25, "Graduate", "delhi", "Available"),
            candidate("Amy", 25, "Graduate", "delhi", "Not Available"),
            candidate("Max", 25, "Graduate", "karnataka", "Available"),
            candidate("Bea", 31, "Graduate", "delhi", "Available"),
        ];
        let filter = FilterSpec {
            qualification: Some("Graduate".into()),
            location: Some("delhi".into()),
            occupation_status: Some("Available".into()),
            age: Some("25".into()),
            ..FilterSpec::default()
        };
        let page = QueryService::query(&list, &filter, 1, 10);
        let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zed"]);

        let by_location = FilterSpec {
            location: Some("delhi".into()),
            qualification: Some(String::new()),
            ..FilterSpec::default()
        };
        let names: Vec<_> = QueryService::query(&list, &by_location, 1, 10)
            .items
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["Zed", "Amy", "Bea"]);
    }

    #[test]
    fn non_numeric_age_filter_is_ignored() {
        let list = many(3);
        let filter = FilterSpec {
            age: Some("abc".into()),
            ..FilterSpec::default()
        };
        assert_eq!(QueryService::query(&list, &filter, 1, 10).total_elements, 3);
    }

    #[test]
    fn pagination_counts_pages_and_slices() {
        let list = many(25);
        let page3 = QueryService::query(&list, &FilterSpec::default(), 3, 10);
        assert_eq!(page3.total_pages, 3);
        assert_eq!(page3.items.len(), 5);
        assert_eq!(page3.items[0].name, "Person 20");

        let page4 = QueryService::query(&list, &FilterSpec::default(), 4, 10);
        assert!(page4.items.is_empty());
        assert_eq!(page4.total_elements, 25);
        assert_eq!(page4.current_page, 4);
    }

    #[test]
    fn empty_result_has_one_page() {
        let filter = FilterSpec {
            name: Some("nobody".into()),
            ..FilterSpec::default()
        };
        let page = QueryService::query(&many(4), &filter, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 1);

        let page = QueryService::query(&[], &FilterSpec::default(), 0, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn changing_filter_resets_to_first_page() {
        let mut list = many(25);
        list[3].location = "karnataka".into();
        list[17].location = "karnataka".into();

        let mut state = QueryState::new(10);
        state.set_page(3);
        assert_eq!(state.run(&list).items.len(), 5);

        state.apply_filter(FilterSpec {
            location: Some("karnataka".into()),
            ..FilterSpec::default()
        });
        let page = state.run(&list);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items.len(), 2);

        state.set_page(2);
        state.apply_search(Some("person 1".into()));
        assert_eq!(state.page, 1);
        assert_eq!(state.run(&list).items.len(), 1);
    }

    #[test]
    fn reapplying_same_filter_keeps_page() {
        let mut state = QueryState::new(10);
        state.set_page(2);
        state.apply_filter(FilterSpec::default());
        assert_eq!(state.page, 2);
    }

    #[test]
    fn filter_options_are_distinct_and_ages_sorted() {
        let list = vec![
            candidate("A", 30, "Graduate", "delhi", "Available"),
            candidate("B", 22, "12th", "N/A", "Available"),
            candidate("C", 22, "Graduate", "", "Not Available"),
            candidate("D", 45, "10th", "karnataka", "Available"),
        ];
        let options = QueryService::derive_filter_options(&list);
        assert_eq!(options.ages, vec![22, 30, 45]);
        assert_eq!(options.qualifications, vec!["Graduate", "12th", "10th"]);
        assert_eq!(options.locations, vec!["delhi", "karnataka"]);
        assert_eq!(options.occupation_statuses, vec!["Available", "Not Available"]);
    }
}
