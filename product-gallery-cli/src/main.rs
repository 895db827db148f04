use clap::{Parser, Subcommand};
use product_gallery_core::{
    DataSource, FileDataSource, GalleryConfig, PageControls, ProductView, RenderState,
    http_source, new_product_view,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "product-gallery-cli")]
#[command(about = "Browse a remote product catalog one page at a time")]
struct Cli {
    /// Products endpoint (overrides config file and environment)
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Items per page
    #[arg(long, global = true)]
    page_size: Option<usize>,
    /// Read products from a local JSON file instead of the endpoint
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of products
    Show {
        /// Page to show, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Print the item and page counts
    Pages,
}

async fn load_view<S: DataSource>(source: &S, config: &GalleryConfig) -> ProductView {
    let mut view = new_product_view(config);
    view.initialize(source).await;
    view
}

fn format_controls(controls: &PageControls) -> String {
    let markers: Vec<String> = controls
        .markers
        .iter()
        .map(|marker| {
            if marker.current {
                format!("[{}]", marker.number)
            } else {
                marker.number.to_string()
            }
        })
        .collect();

    format!(
        "{} {} {}",
        if controls.previous_enabled { "<" } else { " " },
        markers.join(" "),
        if controls.next_enabled { ">" } else { " " },
    )
}

fn print_page(view: &mut ProductView, page: usize) {
    view.go_to_page(page.saturating_sub(1));

    match view.render_state() {
        RenderState::Loading => {
            println!("Loading data...");
            println!("(no products were returned)");
        }
        RenderState::Ready {
            page_number,
            items,
            controls,
        } => {
            let (start, end) = view.visible_range();
            println!("Page {} of {}", page_number, view.page_count());
            println!("{}", format_controls(&controls));
            println!("Showing items {}-{} of {}", start + 1, end, view.items().len());
            for product in items {
                println!("  #{:<4} {}  <{}>", product.id, product.title, product.thumbnail);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match GalleryConfig::load()
        .and_then(|config| config.with_overrides(cli.endpoint.clone(), cli.page_size))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mut view = match &cli.file {
        Some(path) => load_view(&FileDataSource::new(path), &config).await,
        None => load_view(&http_source(&config)?, &config).await,
    };

    match cli.command {
        Commands::Show { page } => print_page(&mut view, page),
        Commands::Pages => {
            println!(
                "{} products, {} per page, {} pages",
                view.items().len(),
                view.page_size(),
                view.page_count()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use product_gallery_core::PageMarker;

    fn controls(pages: usize, current: usize) -> PageControls {
        PageControls {
            markers: (0..pages)
                .map(|index| PageMarker {
                    index,
                    number: index + 1,
                    current: index == current,
                })
                .collect(),
            previous_enabled: current != 0,
            next_enabled: current + 1 != pages,
        }
    }

    #[test]
    fn first_page_blanks_previous() {
        assert_eq!(format_controls(&controls(3, 0)), "  [1] 2 3 >");
    }

    #[test]
    fn middle_page_shows_both_arrows() {
        assert_eq!(format_controls(&controls(3, 1)), "< 1 [2] 3 >");
    }

    #[test]
    fn last_page_blanks_next() {
        assert_eq!(format_controls(&controls(3, 2)), "< 1 2 [3]  ");
    }

    #[test]
    fn single_page_blanks_both() {
        assert_eq!(format_controls(&controls(1, 0)), "  [1]  ");
    }
}
