use std::fmt::Write;

use comfy_table::Cell;

use crate::providers::jenkins::{job_url, Job};

use super::styling::{bright, cyan, dim};
use super::tables::{
    color_coded_status_cell, create_table, format_timestamp, header_cells, last_build_cell,
};

/// Prints search results as a table to stdout.
pub fn print_jobs(jobs: &[Job], base_url: &str) {
    println!("{}", render_jobs(jobs, base_url));
}

/// Prints a resolved job and its branches to stdout.
pub fn print_job(job: &Job, base_url: &str) {
    println!("{}", render_job(job, base_url));
}

fn add_section_header(output: &mut String, emoji: &str, title: &str) {
    let _ = writeln!(output, "{} {}", bright(emoji), bright(title).underlined());
}

fn render_jobs(jobs: &[Job], base_url: &str) -> String {
    let mut output = String::new();
    add_section_header(&mut output, "🔎", &format!("Jobs ({})", jobs.len()));

    if jobs.is_empty() {
        let _ = writeln!(output, "  {}", dim("No matching job"));
        return output;
    }

    let mut table = create_table();
    table.set_header(header_cells(&["Job", "Name", "Status", "Last build", "Link"]));
    for job in jobs {
        table.add_row(vec![
            Cell::new(&job.id),
            Cell::new(job.name.as_deref().unwrap_or("")),
            color_coded_status_cell(&job.status, job.building),
            last_build_cell(job.last_build),
            Cell::new(job_url(base_url, &job.id)),
        ]);
    }
    let _ = writeln!(output, "{table}");
    output
}

fn render_job(job: &Job, base_url: &str) -> String {
    let mut output = String::new();

    add_section_header(&mut output, "📦", job.display_name());
    let _ = writeln!(output, "  {} {}", dim("Job:"), cyan(&job.id));
    if let Some(description) = &job.description {
        let _ = writeln!(output, "  {} {}", dim("Description:"), description);
    }
    let building = if job.building { " (building)" } else { "" };
    let _ = writeln!(output, "  {} {}{}", dim("Status:"), job.status, building);
    let _ = writeln!(
        output,
        "  {} {}",
        dim("Last build:"),
        format_timestamp(job.last_build)
    );
    let _ = writeln!(output, "  {} {}", dim("Link:"), job_url(base_url, &job.id));

    let branches = job.jobs.as_deref().unwrap_or_default();
    if branches.is_empty() {
        return output;
    }

    output.push('\n');
    add_section_header(&mut output, "🌿", &format!("Branches ({})", branches.len()));

    let mut table = create_table();
    table.set_header(header_cells(&["Branch", "Status", "Last build", "Pull request"]));
    for branch in branches {
        table.add_row(vec![
            Cell::new(branch.display_name()),
            color_coded_status_cell(&branch.status, branch.building),
            last_build_cell(branch.last_build),
            Cell::new(if branch.pull_request_branch { "yes" } else { "" }),
        ]);
    }
    let _ = writeln!(output, "{table}");
    output
}
