use crate::metrics::RunReport;

pub(crate) fn print_summary(report: &RunReport) {
    println!("Duration: {}s", report.duration.as_secs());
    println!("Virtual Users: {}", report.vus);
    println!(
        "Iterations: {}/{} completed",
        report.iterations_completed, report.iterations
    );
    println!(
        "Checks: {} ({} passed, {} failed)",
        report.total_checks(),
        report.total_passed(),
        report.total_failed()
    );
    for (tag, counts) in &report.checks {
        println!(
            "  {:<10} passed {:>8}  failed {:>8}",
            tag, counts.passed, counts.failed
        );
    }
}
