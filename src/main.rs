use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use roast_pages::render::Renderer;
use roast_pages::{config, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roast-pages")]
#[command(about = "Programmatic SEO page generator")]
#[command(long_about = "\
Programmatic SEO page generator

A small catalogue of dimensions (genre, roast style, target, critic, ...) is
expanded into one static landing page per combination of values, plus the
sitemaps that let search engines find them.

Output structure:

  public/
  ├── sitemap.xml                  # Sitemap index
  ├── sitemap-main.xml             # The interactive app's root URL
  ├── sitemap-programmatic.xml     # One entry per generated page
  └── p/
      └── fantasy-savage-plot/
          └── index.html

Slugs join the value ids of a combination with '-'. When two combinations
produce the same slug, the first one enumerated keeps it.

The output directory is wiped on every build.

Run 'roast-pages gen-config' to generate a documented pages.toml.")]
#[command(version)]
struct Cli {
    /// Page catalogue config
    #[arg(long, default_value = "pages.toml", global = true)]
    config: PathBuf,

    /// Output directory (cleared on every build)
    #[arg(long, default_value = "public", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate every page and sitemap into the output directory
    Build {
        /// Sitemap lastmod date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        lastmod: Option<NaiveDate>,
    },
    /// Validate the config and print the page plan without writing anything
    Check {
        /// List every page slug in enumeration order
        #[arg(long)]
        list: bool,
    },
    /// Print one rendered page to stdout
    Render {
        /// Page slug, e.g. fantasy-savage-plot
        slug: String,
    },
    /// Print a stock pages.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { lastmod } => {
            println!("==> Loading {}", cli.config.display());
            let site_config = config::load_config(&cli.config)?;
            init_thread_pool(&site_config.processing);

            let today = lastmod.unwrap_or_else(|| chrono::Local::now().date_naive());
            println!("==> Generating pages → {}", cli.output.display());
            let report = generate::generate(&site_config, &cli.output, today)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check { list } => {
            println!("==> Checking {}", cli.config.display());
            let site_config = config::load_config(&cli.config)?;
            let plan = generate::plan(&site_config);
            output::print_plan_output(&plan, list);
            println!("==> Config is valid");
        }
        Command::Render { slug } => {
            let site_config = config::load_config(&cli.config)?;
            let plan = generate::plan(&site_config);
            let record = plan
                .pages
                .get(&slug)
                .ok_or_else(|| format!("no page with slug '{slug}' in {}", cli.config.display()))?;
            print!("{}", Renderer::new(&site_config).render(record));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
