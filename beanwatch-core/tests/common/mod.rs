//! Common fixtures and generators for assignment integration tests
//!
//! This module provides:
//! - Named assignment fixtures for well-known platform beans
//! - Proptest strategies producing grammar-valid parameter lists
//! - Hashing helpers for the equality/hash contract

#![allow(dead_code)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use beanwatch_core::JmxBeanAssignment;
use proptest::prelude::*;

/// Pre-built assignments for well-known platform beans
pub struct Fixtures;

impl Fixtures {
    /// Heap usage on the memory bean
    pub fn heap_memory() -> JmxBeanAssignment {
        JmxBeanAssignment::new("java.lang")
            .with_parameter("type", "Memory")
            .with_attribute("HeapMemoryUsage")
    }

    /// Young generation collector of the parallel GC
    pub fn scavenge_collector() -> JmxBeanAssignment {
        JmxBeanAssignment::new("java.lang")
            .with_parameter("type", "GarbageCollector")
            .with_parameter("name", "PS Scavenge")
            .with_attribute("CollectionCount")
            .with_attribute("CollectionTime")
    }

    /// Thread bean with several attributes
    pub fn threading() -> JmxBeanAssignment {
        JmxBeanAssignment::new("java.lang")
            .with_parameter("type", "Threading")
            .with_attribute("ThreadCount")
            .with_attribute("PeakThreadCount")
            .with_attribute("DaemonThreadCount")
    }
}

/// Hash a value with the std hasher
pub fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Domain text valid under the object name grammar
pub fn domain_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}(\\.[a-z][a-z0-9]{0,8}){0,2}"
}

/// Key text valid under the object name grammar
pub fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,10}"
}

/// Unquoted value text valid under the object name grammar
pub fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 _.-]{0,12}"
}

/// Parameter lists with unique keys, in generation order
pub fn parameters_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 1..6).prop_map(|pairs| {
        let mut unique: Vec<(String, String)> = Vec::new();
        for (key, value) in pairs {
            if !unique.iter().any(|(k, _)| *k == key) {
                unique.push((key, value));
            }
        }
        unique
    })
}

/// Build an assignment from generated parts
pub fn assignment_from(domain: &str, parameters: &[(String, String)]) -> JmxBeanAssignment {
    parameters
        .iter()
        .fold(JmxBeanAssignment::new(domain), |assignment, (k, v)| {
            assignment.with_parameter(k.as_str(), v.as_str())
        })
}

/// Expected candidate text for an assignment
pub fn expected_name(domain: &str, parameters: &[(String, String)]) -> String {
    let joined = parameters
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",");
    format!("{domain}:{joined}")
}
