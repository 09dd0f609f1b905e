use clap::{Parser, Subcommand, ValueEnum};
use manifest::Manifest;
use medimage_core::{
    config::{related_limit_from_env_value, validate_related_limit},
    AudienceLevel, Catalog, CoreConfig, ImageCategory, ImageResolver, MedicalImage,
    RELATED_LIMIT_ENV,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "medimage")]
#[command(about = "Medical image catalog CLI")]
struct Cli {
    /// Manifest file to query instead of the builtin catalog (.yaml, .yml or .json)
    #[arg(long, global = true, env = "MEDIMAGE_MANIFEST_PATH")]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all images
    List,
    /// Show one image in full
    Show {
        /// Image id
        id: String,
    },
    /// List images attached to a content entry, marking the featured one
    Entry {
        /// Content entry id
        entry_id: String,
    },
    /// Case-insensitive search over titles, descriptions, tags and systems
    Search {
        query: String,
    },
    /// List images in a category
    Category {
        /// anatomical, imaging, histology, pathology, clinical, cross-section, chart or diagram
        category: ImageCategory,
    },
    /// List images for a body system (case-insensitive)
    System {
        system: String,
    },
    /// List images for an audience level
    Level {
        /// patient, intermediate or professional
        level: AudienceLevel,
    },
    /// List images carrying a tag (case-insensitive)
    Tag {
        tag: String,
    },
    /// List images published under a license (case-insensitive)
    License {
        license: String,
    },
    /// List images not attached to any content entry
    Unmapped,
    /// Print which of the given entry ids have no images
    WithoutImages {
        #[arg(required = true)]
        entry_ids: Vec<String>,
    },
    /// List every entry id referenced by an image
    Entries,
    /// Show the gallery preview (one image per gallery category)
    Featured,
    /// List images related to an image
    Related {
        /// Image id
        id: String,
        /// Maximum number of images (default: MEDIMAGE_RELATED_LIMIT, or 6)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print catalog statistics
    Stats,
    /// Load the catalog and report whether it is valid
    Validate,
    /// Write the catalog as a manifest to stdout
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Yaml)]
        format: ExportFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Yaml,
    Json,
}

fn print_images(images: &[&MedicalImage]) {
    if images.is_empty() {
        println!("No images found.");
        return;
    }
    for image in images {
        println!(
            "{} [{} / {}] {}",
            image.id, image.category, image.level, image.title
        );
    }
}

fn print_image(image: &MedicalImage) {
    println!("ID: {}", image.id);
    println!("Title: {}", image.title);
    if !image.description.is_empty() {
        println!("Description: {}", image.description);
    }
    println!("Path: {} ({})", image.path, image.format);
    println!("Category: {}", image.category);
    println!("Level: {}", image.level);
    println!("Systems: {}", image.systems.join(", "));
    println!("Tags: {}", image.tags.join(", "));
    println!("Entries: {}", image.related_entry_ids.join(", "));

    let attribution = &image.attribution;
    let mut credit = attribution.source.clone();
    if let Some(author) = &attribution.author {
        credit = format!("{author}, {credit}");
    }
    if let Some(year) = attribution.year {
        credit = format!("{credit} ({year})");
    }
    println!("Attribution: {credit} - {}", attribution.license);
    if let Some(url) = &attribution.url {
        println!("Source URL: {url}");
    }
}

/// The `--limit` flag when given, otherwise the resolver's configured default.
fn related_limit(flag: Option<usize>, resolver: &ImageResolver) -> anyhow::Result<usize> {
    let limit = flag.unwrap_or(resolver.related_limit());
    validate_related_limit(limit)?;
    Ok(limit)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medimage_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'medimage --help' for commands");
        return Ok(());
    };

    let cfg = CoreConfig::new(
        cli.manifest,
        related_limit_from_env_value(std::env::var(RELATED_LIMIT_ENV).ok())?,
    )?;
    let catalog = Catalog::from_config(&cfg)?;
    let resolver = ImageResolver::with_related_limit(catalog, cfg.related_limit());

    match command {
        Commands::List => {
            let images: Vec<&MedicalImage> = resolver.all_images().iter().collect();
            print_images(&images);
        }
        Commands::Show { id } => match resolver.get_image_by_id(&id) {
            Some(image) => print_image(image),
            None => println!("No image with id: {id}"),
        },
        Commands::Entry { entry_id } => {
            let views = resolver.entry_image_views(&entry_id);
            if views.is_empty() {
                println!("No images for entry: {entry_id}");
            }
            for view in views {
                let marker = if view.is_featured { "*" } else { " " };
                println!(
                    "{marker} {} [{}] {} - {}",
                    view.image_id, view.image_type, view.title, view.alt_text
                );
            }
        }
        Commands::Search { query } => print_images(&resolver.search_images(&query)),
        Commands::Category { category } => print_images(&resolver.images_by_category(category)),
        Commands::System { system } => print_images(&resolver.images_by_system(&system)),
        Commands::Level { level } => print_images(&resolver.images_by_level(level)),
        Commands::Tag { tag } => print_images(&resolver.images_by_tag(&tag)),
        Commands::License { license } => print_images(&resolver.images_by_license(&license)),
        Commands::Unmapped => print_images(&resolver.unmapped_images()),
        Commands::WithoutImages { entry_ids } => {
            let missing = resolver.entries_without_images(&entry_ids);
            if missing.is_empty() {
                println!("Every entry has images.");
            }
            for entry_id in missing {
                println!("{entry_id}");
            }
        }
        Commands::Entries => {
            for entry_id in resolver.entries_with_images() {
                println!("{entry_id}");
            }
        }
        Commands::Featured => print_images(&resolver.featured_images()),
        Commands::Related { id, limit } => {
            let limit = related_limit(limit, &resolver)?;
            if resolver.get_image_by_id(&id).is_none() {
                println!("No image with id: {id}");
            } else {
                print_images(&resolver.related_images(&id, Some(limit)));
            }
        }
        Commands::Stats => {
            let stats = resolver.image_statistics();
            println!("Total: {}", stats.total);
            println!("By category:");
            for (category, count) in &stats.by_category {
                println!("  {category}: {count}");
            }
            println!("By system:");
            for (system, count) in &stats.by_system {
                println!("  {system}: {count}");
            }
            println!("By license:");
            for (license, count) in &stats.by_license {
                println!("  {license}: {count}");
            }
        }
        Commands::Validate => {
            println!(
                "Catalog is valid: {} images, {} entries referenced",
                resolver.catalog().len(),
                resolver.entries_with_images().len()
            );
        }
        Commands::Export { format } => {
            let images = resolver.all_images();
            let text = match format {
                ExportFormat::Yaml => Manifest::render_yaml(images)?,
                ExportFormat::Json => Manifest::render_json(images)?,
            };
            println!("{text}");
        }
    }

    Ok(())
}
