pub mod json;
pub mod table;

use crate::record::ProfileRecord;
use crate::run::RunSummary;
use crate::store::State;
use crate::util::format_count;

pub fn print_state(state: &State, json_output: bool) {
    if json_output {
        println!("{}", json::render(state));
    } else {
        print!("{}", table::render(state));
    }
}

pub fn print_record(record: &ProfileRecord, json_output: bool) {
    if json_output {
        println!("{}", json::render_record(record));
        return;
    }

    println!("{}", record.username);
    println!("  followers:  {}", format_count(record.followers));
    println!("  following:  {}", format_count(record.following));
    println!("  posts:      {}", format_count(record.posts));
    println!("  likes:      {}", format_count(record.likes));
    println!("  name:       {}", record.display_name.as_deref().unwrap_or("-"));
    println!("  bio:        {}", record.bio.as_deref().unwrap_or("-"));
    println!("  picture:    {}", record.profile_pic_url.as_deref().unwrap_or("-"));
}

pub fn print_summary(summary: &RunSummary, verbose: bool) {
    if summary.changed == 0 {
        println!("no changes detected in this run");
    } else {
        println!(
            "{} change(s) across {} fetched profile(s), {} history row(s) written",
            summary.changed, summary.fetched, summary.appended
        );
    }

    if let Some(duration_ms) = summary.duration_ms {
        if verbose {
            println!("run completed in {:.2}s", duration_ms as f64 / 1000.0);
        }
    }

    print_diagnostics(summary, verbose);
}

fn print_diagnostics(summary: &RunSummary, verbose: bool) {
    if summary.diagnostics.is_empty() {
        return;
    }

    if verbose {
        eprintln!("\nDiagnostics:");
        eprintln!("{}", "-".repeat(40));
        for diagnostic in &summary.diagnostics {
            eprintln!("  {diagnostic}");
        }
    } else {
        for diagnostic in &summary.diagnostics {
            eprintln!("[skipped] {diagnostic}");
        }
    }
}
