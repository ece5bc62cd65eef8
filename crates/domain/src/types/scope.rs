//! Listing filters translated into query parameters

use serde::{Deserialize, Serialize};

/// Filter for the reward catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardScope {
    /// Restrict to these category ids.
    pub category_ids: Vec<String>,
    /// Restrict to these tag ids.
    pub tag_ids: Vec<String>,
    /// Page, starting at 1.
    pub page: Option<u32>,
    /// Page size.
    pub size: Option<u32>,
}

impl RewardScope {
    /// Query pairs for this filter. Repeated keys encode lists.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        pairs.extend(self.category_ids.iter().map(|id| ("categories".to_string(), id.clone())));
        pairs.extend(self.tag_ids.iter().map(|id| ("tag_ids".to_string(), id.clone())));
        push_paging(&mut pairs, self.page, self.size);
        pairs
    }
}

/// Filter for the user's vouchers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherScope {
    /// Restrict to one voucher type, e.g. `active` or `redeemed`.
    pub voucher_type: Option<String>,
    /// Page, starting at 1.
    pub page: Option<u32>,
    /// Page size.
    pub size: Option<u32>,
}

impl VoucherScope {
    /// Query pairs for this filter.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(voucher_type) = &self.voucher_type {
            pairs.push(("type".to_string(), voucher_type.clone()));
        }
        push_paging(&mut pairs, self.page, self.size);
        pairs
    }
}

fn push_paging(pairs: &mut Vec<(String, String)>, page: Option<u32>, size: Option<u32>) {
    if let Some(page) = page {
        pairs.push(("page".to_string(), page.to_string()));
    }
    if let Some(size) = size {
        pairs.push(("size".to_string(), size.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_scope_repeats_list_keys() {
        let scope = RewardScope {
            category_ids: vec!["1".into(), "2".into()],
            tag_ids: vec!["9".into()],
            page: Some(2),
            size: None,
        };
        assert_eq!(
            scope.query_pairs(),
            vec![
                ("categories".to_string(), "1".to_string()),
                ("categories".to_string(), "2".to_string()),
                ("tag_ids".to_string(), "9".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn empty_scopes_produce_no_query() {
        assert!(RewardScope::default().query_pairs().is_empty());
        assert!(VoucherScope::default().query_pairs().is_empty());
    }
}
