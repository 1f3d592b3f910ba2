use anyhow::Context;
use clap::{Parser, Subcommand};
use prime_spirals::analysis::SpiralReport;
use prime_spirals::viz_common::{self, format_num, SpiralArgs};
use prime_spirals::{color_of, Bucket, FamilySets, Grid, Rgb, SpiralGenerator, FAMILY_CONSTANTS};

/// Prime Spirals — Ulam and Sacks layouts of the integers, Euler-polynomial primes highlighted
#[derive(Parser)]
#[command(name = "prime-spirals", version, about)]
struct Cli {
    #[command(flatten)]
    spiral: SpiralArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count integers and pixels per color bucket
    Census,
    /// Print the generated grid as text (one character per cell)
    Show {
        /// Refuse grids wider than this many cells
        #[arg(long, default_value_t = 120)]
        max_width: usize,
    },
    /// List the first members of each prime-generating family
    Families {
        /// How many members to list per family
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Census => cmd_census(&cli.spiral),
        Commands::Show { max_width } => cmd_show(&cli.spiral, max_width),
        Commands::Families { count } => cmd_families(count),
    }
}

fn cmd_census(args: &SpiralArgs) -> anyhow::Result<()> {
    let (generator, grid) =
        viz_common::generate(args).context("failed to generate spiral")?;
    let report = SpiralReport::from_grid(generator.as_ref(), &grid);

    println!("╔══════════════════════════════════════════════════╗");
    println!(
        "║  {:<8} spiral, grid {:>8} x {:<8}          ║",
        args.algorithm.name(),
        grid.dim(),
        grid.dim()
    );
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  {:<14} {:>15} {:>15}  ║", "bucket", "integers", "pixels");
    for ((bucket, numbers), (_, pixels)) in report.numbers.rows().into_iter().zip(report.pixels.rows()) {
        println!(
            "║  {:<14} {:>15} {:>15}  ║",
            bucket.label(),
            format_num(numbers),
            format_num(pixels)
        );
    }
    println!("╠══════════════════════════════════════════════════╣");
    println!(
        "║  {:<14} {:>15} {:>15}  ║",
        "all primes",
        format_num(report.numbers.primes()),
        format_num(report.pixels.primes())
    );
    println!("╚══════════════════════════════════════════════════╝");
    Ok(())
}

fn cmd_show(args: &SpiralArgs, max_width: usize) -> anyhow::Result<()> {
    let generator = args.build().context("invalid spiral arguments")?;
    if generator.dim() > max_width {
        anyhow::bail!(
            "grid is {} cells wide, more than --max-width {}; use a smaller --size",
            generator.dim(),
            max_width
        );
    }
    let grid = generator.generate()?;
    print!("{}", render_text(&grid));
    println!("\n  R: n²+n+41   G: n²+n+17   B: n²+n+11   #: other prime   .: none");
    Ok(())
}

fn cmd_families(count: usize) -> anyhow::Result<()> {
    let sets = FamilySets::new();
    for (c, set) in FAMILY_CONSTANTS.iter().zip([&sets.f41, &sets.f17, &sets.f11]) {
        let mut members: Vec<i64> = set.iter().copied().collect();
        members.sort_unstable();
        let shown: Vec<String> = members.iter().take(count).map(|v| v.to_string()).collect();
        println!(
            "  i²+i+{:<3} {:>4} primes of 1000 terms: {}{}",
            c,
            members.len(),
            shown.join(", "),
            if members.len() > count { ", ..." } else { "" }
        );
    }
    Ok(())
}

fn cell_char(color: Rgb) -> char {
    match Bucket::ALL.iter().copied().find(|&b| color_of(b) == color) {
        Some(Bucket::Family41) => 'R',
        Some(Bucket::Family17) => 'G',
        Some(Bucket::Family11) => 'B',
        Some(Bucket::GenericPrime) => '#',
        _ => '.',
    }
}

fn render_text(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.dim() * (grid.dim() + 1));
    for row in grid.cells().chunks(grid.dim().max(1)) {
        out.extend(row.iter().map(|&c| cell_char(c)));
        out.push('\n');
    }
    out
}
