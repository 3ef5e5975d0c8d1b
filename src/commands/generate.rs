//! Export the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Site;

/// Render every page into the public directory
pub async fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(site)?;
    let written = generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages into {:?} in {:.2}s",
        written,
        site.public_dir,
        duration.as_secs_f64()
    );

    Ok(())
}
