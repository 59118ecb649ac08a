use anyhow::Result;
use std::io::{BufRead, Write};
use vsm_core::IrSystem;

const RULE: &str = "===================================================================";

/// Prompt for queries and print `score: title` for every positive ranked hit.
/// Stops on `x`/`X` or end of input.
pub fn run<R: BufRead, W: Write>(system: &IrSystem, input: R, out: &mut W) -> Result<()> {
    let mut lines = input.lines();
    loop {
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        write!(out, "Enter your query, X to exit: ")?;
        out.flush()?;

        let Some(line) = lines.next() else { break };
        let query = line?;
        if query.trim().eq_ignore_ascii_case("x") {
            break;
        }

        writeln!(out, "\nBest matching documents to '{query}':")?;
        for hit in system.ranked_search(&query) {
            writeln!(out, "{}: {}", hit.score, system.title_of(hit.doc_id).unwrap_or("?"))?;
        }
    }
    writeln!(out)?;
    Ok(())
}
