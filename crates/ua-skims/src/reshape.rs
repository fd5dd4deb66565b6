//! Long OD table → named matrices.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::catalog::SkimCatalog;
use crate::matrix::Matrix;
use crate::table::SkimTable;
use crate::SkimResult;

/// Every named matrix of one run, in catalog order.
#[derive(Debug, Clone)]
pub struct SkimMatrices {
    /// Zone count; every matrix is `n × n`.
    pub n:           usize,
    pub matrices:    IndexMap<String, Matrix>,
    /// Matrices written as all zeros because their measure has no source.
    pub zero_filled: usize,
}

impl SkimMatrices {
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Matrix> {
        self.matrices.get(name)
    }
}

/// Build every matrix the catalog names.
///
/// Fails if a period's hour cannot be resolved or a sourced matrix needs an
/// `(hour, mode)` group the table does not have.
pub fn reshape(table: &SkimTable, catalog: &SkimCatalog) -> SkimResult<SkimMatrices> {
    let n = table.zone_count();
    let hours: Vec<u32> = table.hours().into_iter().collect();
    let mut hour_for: HashMap<Option<String>, u32> = HashMap::new();

    let specs = catalog.matrix_specs()?;
    let mut matrices = IndexMap::with_capacity(specs.len());
    let mut zero_filled = 0usize;

    for spec in specs {
        let m = match spec.source {
            None => {
                zero_filled += 1;
                Matrix::zeros(n)
            }
            Some(column) => {
                let hour = match hour_for.get(&spec.period) {
                    Some(h) => *h,
                    None => {
                        let h = catalog.resolve_hour(spec.period.as_deref(), &hours)?;
                        hour_for.insert(spec.period.clone(), h);
                        h
                    }
                };
                table.matrix(hour, &spec.mode, column)?
            }
        };
        matrices.insert(spec.name, m);
    }

    log::info!(
        "reshaped skims into {} matrices of {n}x{n} ({zero_filled} zero-filled)",
        matrices.len()
    );
    Ok(SkimMatrices { n, matrices, zero_filled })
}
