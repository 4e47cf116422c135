// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! VisitAnalyzer (C5, §4.1), grounded on
//! `original_source/.../data_mapper/visit_sequence.py::get_visit_sequences`'s
//! stack-based DFS path enumeration over an ability's control-flow graph.

use crate::errors::LookupError;
use crate::model::program::{Ability, Walker};
use crate::model::visit::{VisitInfo, VisitSequence};
use crate::observability::messages::analysis::VisitSequencesEnumerated;
use crate::observability::messages::StructuredLog;
use std::collections::{HashMap, HashSet};

/// Every candidate `VisitSequence` a walker's abilities can produce,
/// keyed by the node type the ability fires on (§4.1).
pub type VisitAnalysis = HashMap<String, Vec<VisitSequence>>;

/// Enumerate every acyclic path through each of `walker`'s ability CFGs,
/// projected to the `VisitStmt`s each path contains, grouped by the node
/// type the ability fires on.
///
/// Fails with [`LookupError::UnknownEdgeType`] if any visit's edge filter
/// names a type not present in `known_edge_types`.
pub fn analyze_walker(
    walker: &Walker,
    known_edge_types: &HashSet<String>,
) -> Result<VisitAnalysis, LookupError> {
    let mut analysis: VisitAnalysis = HashMap::new();
    for ability in &walker.abilities {
        let sequences = enumerate_visit_sequences(walker, ability, known_edge_types)?;
        VisitSequencesEnumerated {
            walker: &walker.name,
            node_type: &ability.node_type,
            sequence_count: sequences.len(),
        }
        .log();
        analysis
            .entry(ability.node_type.clone())
            .or_default()
            .extend(sequences);
    }
    Ok(analysis)
}

fn enumerate_visit_sequences(
    walker: &Walker,
    ability: &Ability,
    known_edge_types: &HashSet<String>,
) -> Result<Vec<VisitSequence>, LookupError> {
    let mut sequences = Vec::new();
    if ability.cfg.blocks.is_empty() {
        return Ok(sequences);
    }

    // Stack of (path-so-far, visited-set), no loop re-entry within one firing.
    let mut stack: Vec<Vec<usize>> = vec![vec![ability.cfg.entry()]];
    while let Some(path) = stack.pop() {
        let current = *path.last().expect("path is never empty");
        let block = ability
            .cfg
            .block(current)
            .expect("path entries are valid block ids");

        let new_successors: Vec<usize> = block
            .bb_out
            .iter()
            .copied()
            .filter(|next| !path.contains(next))
            .collect();

        if new_successors.is_empty() {
            sequences.push(project_path(walker, ability, &path, known_edge_types)?);
            continue;
        }

        for next in new_successors {
            let mut extended = path.clone();
            extended.push(next);
            stack.push(extended);
        }
    }
    Ok(sequences)
}

fn project_path(
    walker: &Walker,
    ability: &Ability,
    path: &[usize],
    known_edge_types: &HashSet<String>,
) -> Result<VisitSequence, LookupError> {
    let mut sequence = Vec::new();
    for &block_id in path {
        let block = ability.cfg.block(block_id).expect("valid block id");
        for visit in &block.visits {
            if let Some(edge_type) = &visit.edge_type {
                if !known_edge_types.contains(edge_type) {
                    return Err(LookupError::UnknownEdgeType(edge_type.clone()));
                }
            }
            sequence.push(VisitInfo {
                from_node_type: ability.node_type.clone(),
                walker_type: walker.name.clone(),
                edge_type: visit.edge_type.clone(),
                is_async: visit.is_async,
                index: visit.index,
            });
        }
    }
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::program::{BasicBlock, Cfg, VisitStmt};

    fn linear_walker() -> Walker {
        Walker {
            name: "W".to_string(),
            abilities: vec![Ability {
                node_type: "A".to_string(),
                cfg: Cfg {
                    blocks: vec![BasicBlock {
                        visits: vec![VisitStmt {
                            edge_type: None,
                            index: 0,
                            is_async: false,
                        }],
                        bb_out: vec![],
                    }],
                },
            }],
        }
    }

    #[test]
    fn single_block_ability_yields_one_sequence() {
        let walker = linear_walker();
        let analysis = analyze_walker(&walker, &HashSet::new()).unwrap();
        let sequences = &analysis["A"];
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].len(), 1);
    }

    #[test]
    fn branching_cfg_yields_one_sequence_per_path() {
        let walker = Walker {
            name: "W".to_string(),
            abilities: vec![Ability {
                node_type: "A".to_string(),
                cfg: Cfg {
                    blocks: vec![
                        BasicBlock {
                            visits: vec![],
                            bb_out: vec![1, 2],
                        },
                        BasicBlock {
                            visits: vec![VisitStmt {
                                edge_type: None,
                                index: 0,
                                is_async: false,
                            }],
                            bb_out: vec![],
                        },
                        BasicBlock {
                            visits: vec![],
                            bb_out: vec![],
                        },
                    ],
                },
            }],
        };
        let analysis = analyze_walker(&walker, &HashSet::new()).unwrap();
        assert_eq!(analysis["A"].len(), 2);
    }

    #[test]
    fn unknown_edge_type_is_rejected() {
        let walker = Walker {
            name: "W".to_string(),
            abilities: vec![Ability {
                node_type: "A".to_string(),
                cfg: Cfg {
                    blocks: vec![BasicBlock {
                        visits: vec![VisitStmt {
                            edge_type: Some("bogus".to_string()),
                            index: 0,
                            is_async: false,
                        }],
                        bb_out: vec![],
                    }],
                },
            }],
        };
        let err = analyze_walker(&walker, &HashSet::new()).unwrap_err();
        assert!(matches!(err, LookupError::UnknownEdgeType(ref t) if t == "bogus"));
    }
}
