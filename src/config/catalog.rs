use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::json;

use crate::domain::model::Query;
use crate::utils::error::{ProberError, Result};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    query: Vec<Query>,
}

/// The ordered set of queries a run cycles through.
#[derive(Debug, Clone)]
pub struct Catalog {
    queries: Vec<Query>,
}

impl Catalog {
    /// The probes shipped with the tool, aimed at the serverless metrics tiers.
    pub fn builtin() -> Self {
        let queries = vec![
            Query {
                name: "service.node.name-wildcard".to_string(),
                path: "serverless-metrics-*:apm-*,serverless-metrics-*:metrics-apm*".to_string(),
                body: json!({
                    "query": {
                        "wildcard": {
                            "service.node.name": {
                                "value": "es-es-search*"
                            }
                        }
                    }
                }),
            },
            Query {
                name: "service.node.name-term".to_string(),
                path: "serverless-metrics-*:apm-*,serverless-metrics-*:metrics-apm*".to_string(),
                body: json!({
                    "query": {
                        "term": {
                            "service.node.name": {
                                "value": "es-es-search-7c46b56686-sdtrl"
                            }
                        }
                    }
                }),
            },
            Query {
                name: "kubernetes.pod.name-wildcard".to_string(),
                path: "metrics-*,serverless-metrics-*:metrics-*".to_string(),
                body: json!({
                    "query": {
                        "wildcard": {
                            "kubernetes.pod.name": {
                                "value": "es-*"
                            }
                        }
                    }
                }),
            },
            Query {
                name: "kubernetes.pod.name-term".to_string(),
                path: "metrics-*,serverless-metrics-*:metrics-*".to_string(),
                body: json!({
                    "query": {
                        "term": {
                            "kubernetes.pod.name": {
                                "value": "es-es-index-564b5c6d45-7hldp"
                            }
                        }
                    }
                }),
            },
        ];

        // 內建目錄必定有效
        Self { queries }
    }

    /// 從 TOML 檔案載入查詢目錄
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::validated(file.query)
    }

    fn validated(queries: Vec<Query>) -> Result<Self> {
        if queries.is_empty() {
            return Err(ProberError::CatalogError {
                message: "catalog contains no [[query]] entries".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for query in &queries {
            if query.name.trim().is_empty() {
                return Err(ProberError::CatalogError {
                    message: "query name cannot be empty".to_string(),
                });
            }
            if query.path.trim().is_empty() {
                return Err(ProberError::CatalogError {
                    message: format!("query '{}' has an empty index path", query.name),
                });
            }
            if !seen.insert(query.name.clone()) {
                return Err(ProberError::CatalogError {
                    message: format!("duplicate query name '{}'", query.name),
                });
            }
        }

        Ok(Self { queries })
    }

    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
