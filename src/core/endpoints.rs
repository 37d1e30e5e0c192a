//! Weighted selection between Lingvanex backends

use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

use crate::core::errors::{RelayError, Result};
use crate::core::models::GoogleLanguageList;

/// Weights keyed by source language, then target language, then endpoint URL
pub type LanguagePairWeights = HashMap<String, HashMap<String, HashMap<String, f64>>>;

/// Lingvanex endpoints with their supported languages and weights
#[derive(Debug, Clone)]
pub struct EndpointConfiguration {
    /// Endpoint base URLs, in configuration order
    pub endpoints: Vec<String>,
    /// Default weight of each endpoint
    pub default_weights: Vec<f64>,
    /// Union of every endpoint's language list
    pub language_pair_list: GoogleLanguageList,
    /// Per language pair weights
    pub language_pair_weights: LanguagePairWeights,
}

impl EndpointConfiguration {
    /// Build a configuration from parallel lists of endpoints, weights and
    /// the language list each endpoint reported.
    pub fn new(
        endpoints: Vec<String>,
        weights: Vec<f64>,
        language_lists: Vec<GoogleLanguageList>,
    ) -> Result<Self> {
        if endpoints.len() != weights.len() || weights.len() != language_lists.len() {
            return Err(RelayError::ConfigError {
                message: "number of endpoints must match number of weights and number of language lists"
                    .to_string(),
            });
        }
        if endpoints.is_empty() {
            return Err(RelayError::ConfigError {
                message: "at least one endpoint is required".to_string(),
            });
        }

        let mut language_pair_list = GoogleLanguageList::default();
        let mut language_pair_weights = LanguagePairWeights::new();

        for ((endpoint, weight), list) in endpoints.iter().zip(&weights).zip(language_lists) {
            for (sl, sl_name) in &list.sl {
                language_pair_list.sl.insert(sl.clone(), sl_name.clone());
                let by_target = language_pair_weights.entry(sl.clone()).or_default();

                for (tl, tl_name) in &list.tl {
                    language_pair_list.tl.insert(tl.clone(), tl_name.clone());
                    by_target
                        .entry(tl.clone())
                        .or_default()
                        .insert(endpoint.clone(), *weight);
                }
            }
        }

        debug!(
            "Configured {} endpoints covering {} source languages",
            endpoints.len(),
            language_pair_weights.len()
        );

        Ok(Self {
            endpoints,
            default_weights: weights,
            language_pair_list,
            language_pair_weights,
        })
    }

    /// Weight of an endpoint for a language pair, 0 if it doesn't serve it
    pub fn weight(&self, from: &str, to: &str, endpoint: &str) -> f64 {
        self.language_pair_weights
            .get(from)
            .and_then(|by_target| by_target.get(to))
            .and_then(|by_endpoint| by_endpoint.get(endpoint))
            .copied()
            .unwrap_or(0.0)
    }

    /// Pick the endpoint for a language pair at random, proportional to weight
    pub fn select_endpoint(&self, from: &str, to: &str) -> &str {
        self.select_endpoint_with(from, to, &mut rand::thread_rng())
    }

    /// Same as [`select_endpoint`](Self::select_endpoint) with a caller supplied RNG
    pub fn select_endpoint_with<R: Rng>(&self, from: &str, to: &str, rng: &mut R) -> &str {
        let mut total = 0.0;
        let incrementals: Vec<f64> = self
            .endpoints
            .iter()
            .map(|endpoint| {
                total += self.weight(from, to, endpoint);
                total
            })
            .collect();

        let r = rng.gen::<f64>() * total;
        incrementals
            .iter()
            .position(|incremental| r < *incremental)
            .map(|i| self.endpoints[i].as_str())
            // nobody serves the pair, fall back to the first endpoint
            .unwrap_or(self.endpoints[0].as_str())
    }
}
