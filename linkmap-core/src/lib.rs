use colored::Colorize;

pub mod crawl;
pub mod report;

pub fn print_banner() {
    println!(
        "{} {}",
        "linkmap".cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
    println!("{}", "map every asset a site links to".bright_black());
    println!();
}
