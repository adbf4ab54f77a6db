//! Human-readable and JSON renderings of search results.

use std::fmt::{Display, Write};

use endcap::{Configuration, SearchOutcome, SearchParams};
use serde_json::{json, Value};

fn write_list<T: Display>(out: &mut String, label: &str, items: &[T], precision: Option<usize>) {
    let cells: Vec<String> = items
        .iter()
        .map(|v| match precision {
            Some(p) => format!("{:.*}", p, v),
            None => v.to_string(),
        })
        .collect();
    let _ = writeln!(out, "{label}: [{}]", cells.join(" "));
}

fn wafer_limits(cfg: &Configuration) -> Vec<Option<f64>> {
    (0..cfg.n_species())
        .map(|s| cfg.wafer_height_limit(s).ok())
        .collect()
}

/// Parameter header printed before a search.
pub fn render_params(p: &SearchParams) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tolerance policy: {}", p.tolerance);
    let _ = writeln!(out, "Radius min, max: = [{:.2}, {:.2}]", p.r_min, p.r_max);
    let _ = writeln!(out, "L: [{:.2}, {:.2}] step {}", p.l_min, p.l_max, p.step);
    let _ = writeln!(out, "Hreal: [{:.2}, {:.2}]", p.hreal_min, p.hreal_max);
    let _ = writeln!(
        out,
        "costheta: [{:.2}, {:.2}]",
        p.costheta_min, p.costheta_max
    );
    let _ = writeln!(out, "N_species: {}", p.n_species);
    let _ = writeln!(out, "N_rings: {}", p.n_rings);
    let _ = writeln!(
        out,
        "polygon sides: [{}, {}] granularity {}",
        p.n_min, p.n_max, p.side_granularity
    );
    let _ = writeln!(
        out,
        "anchor edges: L1[0] = {:.4}, L2[{}] = {:.4}",
        p.first_inner_edge(),
        p.n_species.saturating_sub(1),
        p.last_outer_edge()
    );
    out
}

/// One accepted configuration in the per-ring text layout.
pub fn render_configuration(cfg: &Configuration) -> String {
    let mut out = String::new();
    write_list(&mut out, "L1", cfg.l1(), Some(2));
    write_list(&mut out, "L2", cfg.l2(), Some(2));
    write_list(&mut out, "npoly", cfg.npoly(), None);
    write_list(&mut out, "types", cfg.types(), None);
    write_list(&mut out, "sensor Height", cfg.hr(), Some(2));
    let limits: Vec<String> = wafer_limits(cfg)
        .into_iter()
        .map(|l| l.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}")))
        .collect();
    write_list(&mut out, "wafer height limit", &limits, None);
    for (ring, r) in cfg.radius().iter().enumerate() {
        let _ = writeln!(
            out,
            "Ring {}  Radius: [{:.3} {:.3}]\tring height: {:.3}\tcostheta: {:.5} ",
            ring + 1,
            r.inner,
            r.outer,
            r.height(),
            cfg.tilt_ratio(ring)
        );
    }
    out
}

pub fn configuration_json(cfg: &Configuration) -> Value {
    let rings: Vec<Value> = cfg
        .radius()
        .iter()
        .enumerate()
        .map(|(ring, r)| {
            json!({
                "species": cfg.types()[ring],
                "sides": cfg.npoly()[ring],
                "inner_radius": r.inner,
                "outer_radius": r.outer,
                "height": r.height(),
                "tilt_ratio": cfg.tilt_ratio(ring),
            })
        })
        .collect();
    json!({
        "L1": cfg.l1(),
        "L2": cfg.l2(),
        "Hr": cfg.hr(),
        "wafer_height_limit": wafer_limits(cfg),
        "rings": rings,
    })
}

/// Whole outcome plus the provenance block for `--json` output.
pub fn outcome_json(outcome: &SearchOutcome, params: Value) -> Value {
    let counts = json!({
        "samples": outcome.samples,
        "workers": outcome.workers,
        "accepted": outcome.configurations.len(),
    });
    json!({
        "provenance": crate::provenance::block(params, counts),
        "tolerance_policy": outcome.params.tolerance.to_string(),
        "configurations": outcome
            .configurations
            .iter()
            .map(configuration_json)
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use endcap::prelude::*;

    fn built() -> Configuration {
        let params = SearchParams {
            step: 2.0,
            ..SearchParams::default()
        };
        let mut cfg = Configuration::new(params).unwrap();
        let first = cfg.l1()[0];
        cfg.set_species_edges(0, first, 62.0).unwrap();
        cfg.set_species_edges(1, 53.0, 63.0).unwrap();
        let last = cfg.l2()[2];
        cfg.set_species_edges(2, 55.0, last).unwrap();
        cfg.assign_ring(1, 1, 56).unwrap();
        cfg.build_radius(2.0).unwrap();
        cfg
    }

    #[test]
    fn text_layout() {
        let text = render_configuration(&built());
        assert!(text.contains("npoly: [48 56 64]"));
        assert!(text.contains("types: [0 1 2]"));
        assert!(text.contains("sensor Height: [75.00 89.00 131.00]"));
        assert!(text.contains("Ring 1  Radius: [414.000 472.969]"));
        assert_eq!(text.lines().filter(|l| l.starts_with("Ring ")).count(), 3);
    }

    #[test]
    fn params_header_names_policy() {
        let text = render_params(&SearchParams::default());
        assert!(text.starts_with("Tolerance policy: relative"));
        assert!(text.contains("N_species: 3"));
    }

    #[test]
    fn json_document() {
        let cfg = built();
        let outcome = SearchOutcome {
            params: *cfg.params(),
            configurations: vec![cfg],
            samples: 10,
            workers: 16,
        };
        let doc = outcome_json(&outcome, json!({"step_length": 2.0}));
        assert_eq!(doc["provenance"]["counts"]["accepted"], 1);
        assert_eq!(doc["configurations"][0]["rings"][1]["sides"], 56);
        assert_eq!(doc["configurations"][0]["Hr"][2], 131.0);
        assert!(doc["tolerance_policy"]
            .as_str()
            .unwrap()
            .starts_with("relative"));
    }
}
