//! Doctor command for deployment diagnostics
//!
//! Checks the things a request depends on: the credential, the data root
//! and each product workbook.

use colored::Colorize;

use crate::config::{Config, TOKEN_ENV};
use crate::types::ProductType;
use crate::workbook::{SheetSource, WorkbookStore};

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
    store: WorkbookStore,
}

impl Doctor {
    /// Create a new doctor instance
    pub fn new(config: Config) -> Self {
        let store = WorkbookStore::new(config.data.clone());
        Self { config, store }
    }

    /// Run all health checks
    pub fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = vec![self.check_credential(), self.check_data_root()];
        for product in ProductType::ALL {
            checks.push(self.check_workbook(product));
        }
        checks
    }

    /// Check 1: completion credential present
    fn check_credential(&self) -> HealthCheck {
        HealthCheck {
            name: "Credential".to_string(),
            status: if self.config.has_token() {
                HealthStatus::Pass
            } else {
                HealthStatus::Warn(format!("{} not set, /ai will fail", TOKEN_ENV))
            },
        }
    }

    /// Check 2: data root exists
    fn check_data_root(&self) -> HealthCheck {
        let root = &self.config.data.root;
        HealthCheck {
            name: "Data Root".to_string(),
            status: if root.is_dir() {
                HealthStatus::Pass
            } else {
                HealthStatus::Fail(format!("{} is not a directory", root.display()))
            },
        }
    }

    /// Check 3-5: each workbook opens and lists its sheets
    fn check_workbook(&self, product: ProductType) -> HealthCheck {
        match self.store.sheet_names(product) {
            Ok(sheets) if sheets.is_empty() => HealthCheck {
                name: format!("Workbook {}", product.code()),
                status: HealthStatus::Warn("No sheets".to_string()),
            },
            Ok(sheets) => HealthCheck {
                name: format!("Workbook {} ({} sheets)", product.code(), sheets.len()),
                status: HealthStatus::Pass,
            },
            Err(e) => HealthCheck {
                name: format!("Workbook {}", product.code()),
                status: HealthStatus::Fail(e.to_string()),
            },
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\nWorkbook Dashboard Diagnostics\n");
        println!("{:<28} Status", "Check");
        println!("{}", "=".repeat(50));

        for check in checks {
            let message = match &check.status {
                HealthStatus::Pass => "PASS".green().to_string(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow().to_string(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red().to_string(),
            };
            println!("{:<28} {}", check.name, message);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
