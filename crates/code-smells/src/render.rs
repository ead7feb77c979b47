//! Terminal rendering of a completed analysis. Read-only over the document.

use colored::Colorize;

use code_smells_analysis::AnalysisDocument;

pub fn render_analysis(document: &AnalysisDocument) {
    println!();
    println!("{}", "🔍 Code Smell Analysis Results".cyan().bold());
    println!();

    if document.has_flags() {
        for flag in document.flags() {
            println!("{}", "── Code Smell Detected ──".red().bold());
            println!();
            println!("{} {}", "⚠️  Issue:".red().bold(), flag.description);
            println!("{} {}", "📍 Location:".yellow().bold(), flag.location);
            println!();
            println!("{}", "💭 Explanation:".blue().bold());
            println!("{}", flag.explanation);
            println!();
            println!("{}", "💡 Suggestion:".green().bold());
            println!("{}", flag.suggestion);

            if !flag.example_fix.is_empty() {
                println!();
                println!("{}", "✨ Example Fix:".magenta().bold());
                println!("{}", flag.example_fix);
            }
            println!();
        }
    } else {
        println!("{}", "✅ No code smells detected!".green().bold());
        println!();
    }

    println!("{}", "── Overall Assessment ──".cyan().bold());
    println!("{}", document.overall_assessment());
}
