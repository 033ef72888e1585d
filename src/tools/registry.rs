//! Tool registry - declares and dispatches the specialist agent tools
//!
//! Exposes the fixed tool descriptor set and executes tool calls against
//! the mock dataset. Execution is a pure lookup: a miss produces a
//! structured not-found payload, never an error.

use serde_json::{json, Value};

use crate::core::ToolDefinition;
use crate::tools::mock_data::MockDataset;

/// The fixed set of specialist agents the model may consult
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    /// IQVIA market data for therapy areas
    MarketData,
    /// Patent status and FTO analysis
    PatentLandscape,
    /// Clinical trials database
    ClinicalTrials,
    /// Import/export trade data
    TradeData,
    /// Internal knowledge base
    InternalKnowledge,
    /// Scientific publications and news search
    WebIntelligence,
}

impl AgentKind {
    /// All registered agents, in registry order
    pub const ALL: [AgentKind; 6] = [
        AgentKind::MarketData,
        AgentKind::PatentLandscape,
        AgentKind::ClinicalTrials,
        AgentKind::TradeData,
        AgentKind::InternalKnowledge,
        AgentKind::WebIntelligence,
    ];

    /// The wire name the model calls this agent by
    pub fn name(self) -> &'static str {
        match self {
            AgentKind::MarketData => "query_iqvia_api",
            AgentKind::PatentLandscape => "query_patent_database",
            AgentKind::ClinicalTrials => "query_clinical_trials",
            AgentKind::TradeData => "query_exim_data",
            AgentKind::InternalKnowledge => "search_internal_docs",
            AgentKind::WebIntelligence => "web_search",
        }
    }

    /// Resolve a wire name back to an agent; unknown names fall through
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The tool descriptor sent to the model
    fn definition(self) -> ToolDefinition {
        match self {
            AgentKind::MarketData => ToolDefinition::function(
                self.name(),
                "Query IQVIA market data for therapy areas or molecules. Returns market size, growth rate, and competitor information.",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The therapy area or molecule name to search for (e.g., 'neuropathic pain', 'erectile dysfunction')"
                        }
                    },
                    "required": ["query"]
                }),
            ),
            AgentKind::PatentLandscape => ToolDefinition::function(
                self.name(),
                "Search patent database for a specific molecule. Returns patent status, expiry dates, and assignees.",
                json!({
                    "type": "object",
                    "properties": {
                        "molecule": {
                            "type": "string",
                            "description": "The molecule name to search patents for (e.g., 'sildenafil', 'metformin')"
                        }
                    },
                    "required": ["molecule"]
                }),
            ),
            AgentKind::ClinicalTrials => ToolDefinition::function(
                self.name(),
                "Search clinical trials database for a molecule or condition. Returns trial details including status, phase, and sponsors.",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The molecule or condition to search for (e.g., 'sildenafil', 'glp-1')"
                        }
                    },
                    "required": ["query"]
                }),
            ),
            AgentKind::TradeData => ToolDefinition::function(
                self.name(),
                "Get import/export data for APIs and formulations. Returns trade volumes and major trading partners.",
                json!({
                    "type": "object",
                    "properties": {
                        "molecule": {
                            "type": "string",
                            "description": "The molecule name"
                        },
                        "country": {
                            "type": "string",
                            "description": "The country code (e.g., 'us', 'eu', 'india')"
                        }
                    },
                    "required": ["molecule", "country"]
                }),
            ),
            AgentKind::InternalKnowledge => ToolDefinition::function(
                self.name(),
                "Search internal knowledge base for relevant documents and research. Returns document summaries with citations.",
                json!({
                    "type": "object",
                    "properties": {
                        "topic": {
                            "type": "string",
                            "description": "The topic to search for in internal documents"
                        }
                    },
                    "required": ["topic"]
                }),
            ),
            AgentKind::WebIntelligence => ToolDefinition::function(
                self.name(),
                "Perform web search for scientific publications and news. Returns summarized results with sources.",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        }
                    },
                    "required": ["query"]
                }),
            ),
        }
    }
}

/// Registry of the available agent tools
pub struct ToolRegistry {
    dataset: MockDataset,
    definitions: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// Create a registry backed by the built-in mock dataset
    pub fn new() -> Self {
        Self::with_dataset(MockDataset::new())
    }

    /// Create a registry over a specific dataset
    pub fn with_dataset(dataset: MockDataset) -> Self {
        Self {
            dataset,
            definitions: AgentKind::ALL.iter().map(|k| k.definition()).collect(),
        }
    }

    /// All tool definitions, in registry order
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Execute a tool call against the dataset
    ///
    /// Always resolves to a structured payload. A miss yields a well-formed
    /// not-found value; an unregistered name yields the unknown-tool
    /// sentinel, which callers should treat as a caller-side bug rather
    /// than an empty result.
    pub fn execute(&self, name: &str, args: &Value) -> Value {
        let Some(kind) = AgentKind::from_name(name) else {
            return json!({ "error": format!("Unknown tool: {}", name) });
        };

        match kind {
            AgentKind::MarketData => {
                let query = str_arg(args, "query");
                self.dataset
                    .iqvia
                    .iter()
                    .find(|(key, _)| query.contains(key))
                    .map(|(_, value)| value.clone())
                    .unwrap_or_else(|| json!({ "error": "No data found for this therapy area" }))
            }
            AgentKind::PatentLandscape => {
                let molecule = str_arg(args, "molecule");
                self.dataset
                    .patents
                    .iter()
                    .find(|(key, _)| *key == molecule)
                    .map(|(_, value)| value.clone())
                    .unwrap_or_else(|| json!([]))
            }
            AgentKind::ClinicalTrials => {
                let query = str_arg(args, "query");
                self.dataset
                    .trials
                    .iter()
                    .find(|(key, _)| query.contains(key))
                    .map(|(_, value)| value.clone())
                    .unwrap_or_else(|| json!([]))
            }
            AgentKind::TradeData => {
                let molecule = str_arg(args, "molecule");
                let country = match str_arg(args, "country") {
                    c if c.is_empty() => "us".to_string(),
                    c => c,
                };
                let key = format!("{}-{}", molecule, country);
                self.dataset
                    .exim
                    .iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, value)| value.clone())
                    .unwrap_or_else(|| json!({ "error": "No trade data available" }))
            }
            AgentKind::InternalKnowledge => {
                let topic = str_arg(args, "topic");
                let matches: Vec<Value> = self
                    .dataset
                    .internal_docs
                    .iter()
                    .filter(|doc| {
                        doc_field(doc, "title").contains(&topic)
                            || doc_field(doc, "content").contains(&topic)
                    })
                    .cloned()
                    .collect();
                Value::Array(matches)
            }
            AgentKind::WebIntelligence => {
                let query = str_arg(args, "query");
                json!({
                    "summary": format!(
                        "Web search results for \"{}\": Found multiple recent publications and clinical reports. Key findings suggest ongoing research in this area with promising preliminary results.",
                        query
                    ),
                    "sources": [
                        "PubMed Central - Recent review articles",
                        "ClinicalTrials.gov - Active trials database",
                        "Nature Medicine - Latest research publications",
                    ],
                })
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a string argument, normalized to lowercase
fn str_arg(args: &Value, key: &str) -> String {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default()
}

/// A document field lowercased for containment matching
fn doc_field(doc: &Value, key: &str) -> String {
    doc.get(key)
        .and_then(|v| v.as_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_lookup_matches_by_containment() {
        let registry = ToolRegistry::new();
        let result = registry.execute(
            "query_iqvia_api",
            &json!({ "query": "What about Neuropathic Pain?" }),
        );
        assert_eq!(result["market_size_usd"], "6.5B");
        assert_eq!(result["cagr_5yr"], 0.07);
    }

    #[test]
    fn market_lookup_miss_is_structured() {
        let registry = ToolRegistry::new();
        let result = registry.execute("query_iqvia_api", &json!({ "query": "hair loss" }));
        assert_eq!(result["error"], "No data found for this therapy area");
    }

    #[test]
    fn patent_miss_returns_empty_list() {
        let registry = ToolRegistry::new();
        let result = registry.execute(
            "query_patent_database",
            &json!({ "molecule": "ibuprofen" }),
        );
        assert_eq!(result, json!([]));
    }

    #[test]
    fn patent_lookup_is_case_insensitive() {
        let registry = ToolRegistry::new();
        let result = registry.execute(
            "query_patent_database",
            &json!({ "molecule": "Sildenafil" }),
        );
        assert_eq!(result.as_array().unwrap().len(), 2);
    }

    #[test]
    fn trade_lookup_uses_compound_key() {
        let registry = ToolRegistry::new();
        let hit = registry.execute(
            "query_exim_data",
            &json!({ "molecule": "metformin", "country": "US" }),
        );
        assert_eq!(hit["country"], "United States");

        // Missing country defaults to "us"
        let defaulted = registry.execute("query_exim_data", &json!({ "molecule": "metformin" }));
        assert_eq!(defaulted["country"], "United States");

        let miss = registry.execute(
            "query_exim_data",
            &json!({ "molecule": "metformin", "country": "india" }),
        );
        assert_eq!(miss["error"], "No trade data available");
    }

    #[test]
    fn internal_docs_filter_by_topic() {
        let registry = ToolRegistry::new();
        let result = registry.execute("search_internal_docs", &json!({ "topic": "sildenafil" }));
        let docs = result.as_array().unwrap();
        assert!(!docs.is_empty());
        assert!(docs.iter().any(|d| d["id"] == "doc1"));
    }

    #[test]
    fn web_search_always_synthesizes() {
        let registry = ToolRegistry::new();
        let result = registry.execute("web_search", &json!({ "query": "anything at all" }));
        assert!(result["summary"].as_str().unwrap().contains("anything at all"));
        assert_eq!(result["sources"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn unknown_tool_yields_sentinel() {
        let registry = ToolRegistry::new();
        let result = registry.execute("query_genome_api", &json!({}));
        assert_eq!(result["error"], "Unknown tool: query_genome_api");
    }

    #[test]
    fn every_tool_tolerates_absent_arguments() {
        let registry = ToolRegistry::new();
        for kind in AgentKind::ALL {
            let result = registry.execute(kind.name(), &json!({}));
            assert!(
                result.is_object() || result.is_array(),
                "{} must return a structured payload",
                kind.name()
            );
        }
    }

    #[test]
    fn definitions_cover_all_agents() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.definitions().len(), AgentKind::ALL.len());
        for def in registry.definitions() {
            assert_eq!(def.tool_type, "function");
            assert!(AgentKind::from_name(&def.function.name).is_some());
        }
    }
}
