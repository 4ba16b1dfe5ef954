//! Event filter options and the query handed to the connector.

use alloy::json_abi::Event;
use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::EventsConfig;

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

/// Unit of a filter range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeUnit {
    Block,
    Time,
}

/// Inclusive block-number or timestamp range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRange {
    pub unit: RangeUnit,
    pub from: u64,
    pub to: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    pub offset: u64,
    pub limit: u64,
}

/// Raw topic criteria; all set fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCriteria {
    pub address: Option<Address>,
    pub topic0: Option<B256>,
    pub topic1: Option<B256>,
    pub topic2: Option<B256>,
    pub topic3: Option<B256>,
    pub topic4: Option<B256>,
}

impl TopicCriteria {
    /// Criteria matching every emission of `event`.
    pub fn for_event(event: &Event) -> Self {
        Self {
            topic0: Some(event.selector()),
            ..Self::default()
        }
    }

    /// Set topic slot `index` (0 is the event signature).
    pub fn topic(mut self, index: usize, value: B256) -> Self {
        match index {
            0 => self.topic0 = Some(value),
            1 => self.topic1 = Some(value),
            2 => self.topic2 = Some(value),
            3 => self.topic3 = Some(value),
            4 => self.topic4 = Some(value),
            _ => tracing::warn!(index, "Ignoring out-of-range topic index"),
        }
        self
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }
}

/// Caller-facing event filter options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventFilter {
    /// Indexed-argument filters by parameter name, OR-ed together.
    pub filter: Vec<Map<String, Value>>,
    /// Raw topic criteria, replacing `filter` when set.
    pub topics: Option<Vec<TopicCriteria>>,
    pub range: Option<FilterRange>,
    pub order: Option<Order>,
    pub page_options: Option<PageOptions>,
}

/// Fully resolved event query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventQuery {
    pub indexed: Vec<Map<String, Value>>,
    pub criteria: Option<Vec<TopicCriteria>>,
    pub range: Option<FilterRange>,
    pub order: Order,
    pub offset: u64,
    pub limit: u64,
}

impl EventQuery {
    /// Resolve optional caller filter against configured defaults.
    pub fn resolve(filter: Option<&EventFilter>, defaults: &EventsConfig) -> Self {
        let mut query = Self {
            indexed: Vec::new(),
            criteria: None,
            range: None,
            order: defaults.default_order,
            offset: 0,
            limit: defaults.default_limit,
        };

        if let Some(filter) = filter {
            query.indexed = filter.filter.clone();
            query.criteria = filter.topics.clone();
            query.range = filter.range;
            if let Some(order) = filter.order {
                query.order = order;
            }
            if let Some(page) = filter.page_options {
                query.offset = page.offset;
                query.limit = page.limit;
            }
        }

        query
    }
}
