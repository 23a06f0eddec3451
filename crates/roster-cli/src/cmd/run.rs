use super::{counts, index, names, split};
use crate::output::print_json;
use std::path::Path;

/// Index report first, then whichever downstream views were asked for.
pub fn run(root: &Path, with_names: bool, with_counts: bool, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let agg = super::decode_solution(root, &config)?;

    let index = index::write(root, &config, &agg)?;
    let (split, names) = if with_names {
        let split = split::write(root, &config)?;
        let names = names::write(root, &config)?;
        (Some(split), Some(names))
    } else {
        (None, None)
    };
    let counts = if with_counts {
        Some(counts::write(root, &config, &agg.rosters)?)
    } else {
        None
    };

    if json {
        let value = serde_json::json!({
            "index": index,
            "split": split,
            "names": names,
            "counts": counts,
        });
        print_json(&value)?;
        return Ok(());
    }

    index.print();
    if let Some(ref s) = split {
        split::print(s);
    }
    if let Some(ref n) = names {
        names::print(n);
    }
    if let Some(ref c) = counts {
        counts::print(c);
    }
    Ok(())
}
