use anyhow::Result;
use clap::{Parser, Subcommand};
use montage_core::config::schema::SheetGeometry;
use montage_core::layout::{Quad, Tile, TileSource};
use montage_core::manifest::{Entry, SizeClass};
use montage_core::render::ImageTileSource;
use montage_core::{compose, config, layout, manifest, VERSION};

#[derive(Parser, Debug)]
#[command(name = "montage", version = VERSION, about = "Tiled image sheet layout and compositing")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pack a manifest and composite the sheet PNG plus a JSON metadata sidecar
    Render {
        manifest: String,
        #[arg(long, default_value = "montage.png")]
        out: String,
        /// Sheet geometry YAML; defaults to 6 columns of 64x98 cells
        #[arg(long)]
        config: Option<String>,
        /// Override the configured column count
        #[arg(long)]
        tile_width: Option<usize>,
    },
    /// Print the packed grid as text without rendering any image
    Plan {
        manifest: String,
        #[arg(long, default_value_t = 6)]
        tile_width: usize,
    },
    /// Load and inspect a manifest
    Inspect { manifest: String },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render { manifest, out, config: config_path, tile_width } => {
            let mut geo = match config_path {
                Some(path) => config::load_from_path(&path)?,
                None => SheetGeometry::default(),
            };
            if let Some(width) = tile_width {
                geo.tile_width = width;
            }
            let entries = manifest::load_from_path(&manifest)?;
            let mut source = ImageTileSource::new(geo);
            let tiles = layout::pack(entries.into_entries(), geo.tile_width, &mut source)?;
            let meta = compose::meta(&tiles, &geo);
            let sheet = compose::compose(&tiles, &geo)?;
            sheet.save(&out)?;
            let meta_path = format!("{out}.json");
            std::fs::write(&meta_path, meta.to_json()?)?;
            println!(
                "Wrote {}x{} sheet to {} ({} cells, {} blank), metadata in {}",
                sheet.width(),
                sheet.height(),
                out,
                meta.cells,
                meta.blank_cells,
                meta_path
            );
        }
        Command::Plan { manifest, tile_width } => {
            let entries = manifest::load_from_path(&manifest)?;
            let tiles = layout::pack(entries.into_entries(), tile_width, &mut TitleSource)?;
            for row in tiles.chunks(tile_width) {
                let cells: Vec<&str> = row
                    .iter()
                    .map(|t| match t {
                        Tile::Art(title) => title.as_str(),
                        Tile::Blank => ".",
                    })
                    .collect();
                println!("{}", cells.join(" | "));
            }
        }
        Command::Inspect { manifest } => {
            let m = manifest::load_from_path(&manifest)?;
            println!("Loaded manifest: {} entries", m.len());
            println!("  small: {}", m.count_of(SizeClass::Small));
            println!("  large: {}", m.count_of(SizeClass::Large));
        }
    }
    Ok(())
}

/// Placement preview source: artifacts are entry titles, no image I/O.
struct TitleSource;

impl TileSource for TitleSource {
    type Artifact = String;

    fn small(&mut self, entry: &Entry) -> Result<String> {
        Ok(entry.title.clone())
    }

    fn large(&mut self, entry: &Entry) -> Result<Quad<String>> {
        Ok(Quad {
            tl: format!("{}(tl)", entry.title),
            tr: format!("{}(tr)", entry.title),
            bl: format!("{}(bl)", entry.title),
            br: format!("{}(br)", entry.title),
        })
    }
}
