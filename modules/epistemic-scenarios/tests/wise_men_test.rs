//! The wise-men announcements checked world by world and edge by edge.

use anyhow::Result;
use epistemic_formula::{Announce, Formula};
use epistemic_scenarios::{hat_world, UpdateMode, WiseMen};
use epistemic_world::{
    add_reflexive_edges, add_symmetric_edges, relations_from, KripkeStructure, World,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A closed (reflexive, symmetric) model over `hats` with the given edges.
fn closed_model(hats: &[&str], edges: [(&str, Vec<(&str, &str)>); 3]) -> Result<KripkeStructure> {
    let worlds: Vec<World> = hats.iter().map(|h| hat_world(h)).collect();
    let relations = add_symmetric_edges(&add_reflexive_edges(&worlds, &relations_from(edges)));
    Ok(KripkeStructure::new(worlds, relations)?)
}

fn someone_else_red() -> Formula {
    Formula::or(Formula::atom("2:R"), Formula::atom("3:R"))
}

fn six_world_model() -> Result<KripkeStructure> {
    closed_model(
        &["RRW", "RRR", "WRR", "WWR", "RWR", "WRW"],
        [
            ("1", vec![("RRW", "WRW"), ("RWR", "WWR"), ("WRR", "RRR")]),
            ("2", vec![("RWR", "RRR"), ("WRR", "WWR")]),
            ("3", vec![("RRR", "RRW"), ("WRW", "WRR")]),
        ],
    )
}

fn four_world_model() -> Result<KripkeStructure> {
    closed_model(
        &["RRR", "WRR", "WWR", "RWR"],
        [
            ("1", vec![("RWR", "WWR"), ("WRR", "RRR")]),
            ("2", vec![("RWR", "RRR"), ("WRR", "WWR")]),
            ("3", vec![]),
        ],
    )
}

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

#[test]
fn first_announcement_changes_nothing() -> Result<()> {
    let men = WiseMen::new()?;
    let first = men.knowledge_base.get(0).expect("announcement");
    assert_eq!(men.structure.solve(first), men.structure);
    Ok(())
}

#[test]
fn someone_else_red_restricts_to_six_worlds() -> Result<()> {
    let men = WiseMen::new()?;
    let model = men.structure.solve(&someone_else_red());
    assert_eq!(model, six_world_model()?);
    Ok(())
}

#[test]
fn common_knowledge_prunes_to_six_worlds() -> Result<()> {
    let men = WiseMen::new()?;
    let announcement = men.knowledge_base.get(1).expect("announcement");
    assert_eq!(men.structure.violating_worlds(announcement).len(), 8);
    assert!(men.structure.solve(announcement).is_empty());

    let pruned = men.structure.prune(announcement)?;
    assert_eq!(pruned, six_world_model()?);
    assert!(pruned.is_valid(announcement));
    Ok(())
}

#[test]
fn third_man_knows_after_pruning() -> Result<()> {
    let men = WiseMen::new()?;
    let six = men.structure.prune(men.knowledge_base.get(1).expect("announcement"))?;
    let third_knows = men.knowledge_base.get(3).expect("announcement");
    assert_eq!(
        six.violating_worlds(third_knows),
        vec!["RRW", "RRR", "WRR", "WRW"]
    );

    let four = six.prune(third_knows)?;
    assert_eq!(four, four_world_model()?);
    assert_eq!(four.edge_count("3"), 4);
    Ok(())
}

#[test]
fn prune_trace_ends_with_red_third_hat() -> Result<()> {
    let men = WiseMen::new()?;
    let steps = men.run(UpdateMode::Prune)?;
    let last = &steps.last().expect("steps").model;
    assert_eq!(last, &four_world_model()?);
    for world in last.worlds() {
        assert!(world.holds("3:R"), "{}", world.name());
    }
    Ok(())
}

#[test]
fn solve_and_apply_agree() -> Result<()> {
    let men = WiseMen::new()?;
    let steps = men.run(UpdateMode::Solve)?;
    let traced = men.knowledge_base.apply(&men.structure);
    assert_eq!(steps.len(), traced.len());
    for (step, model) in steps.iter().zip(&traced) {
        assert_eq!(&step.model, model);
    }
    assert_eq!(men.knowledge_base.solve_all(&men.structure), traced[3]);
    Ok(())
}

#[test]
fn steps_serialize() -> Result<()> {
    let men = WiseMen::new()?;
    let steps = men.run(UpdateMode::Prune)?;
    let json = serde_json::to_value(&steps)?;
    assert_eq!(json.as_array().map(Vec::len), Some(4));
    assert_eq!(json[3]["index"], 3);
    assert_eq!(json[3]["model"]["worlds"].as_array().map(Vec::len), Some(4));
    Ok(())
}
