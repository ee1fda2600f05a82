//! LaTeX formulas rendered to images via the external `latex` and `dvipng`
//! tools.

use super::{ContentCache, content_key};
use crate::config::LatexConfig;
use crate::error::{CacheError, RenderError};
use image::RgbaImage;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

#[derive(Debug)]
pub struct LatexRenderer {
    cache: ContentCache<RgbaImage>,
    dpi: u32,
    latex: String,
    dvipng: String,
}

impl LatexRenderer {
    pub fn new(config: &LatexConfig) -> Self {
        Self {
            cache: ContentCache::new(config.cache_dir(), config.capacity),
            dpi: config.dpi,
            latex: "latex".to_string(),
            dvipng: "dvipng".to_string(),
        }
    }

    /// Use other executables in place of `latex` and `dvipng`.
    pub fn with_programs(mut self, latex: impl Into<String>, dvipng: impl Into<String>) -> Self {
        self.latex = latex.into();
        self.dvipng = dvipng.into();
        self
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn cache(&self) -> &ContentCache<RgbaImage> {
        &self.cache
    }

    /// Cache key for `text` at this renderer's resolution.
    pub fn key(&self, text: &str) -> String {
        content_key(text, &self.dpi.to_string())
    }

    /// Render `text` (LaTeX source, e.g. `$e^{i\pi} = -1$`) as light-on-dark
    /// image.
    pub fn render(&mut self, text: &str) -> Result<&RgbaImage, RenderError> {
        let key = self.key(text);
        let dpi = self.dpi;
        let (latex, dvipng) = (self.latex.as_str(), self.dvipng.as_str());
        self.cache.get_or_try_insert_with(&key, |dir| {
            let png = dir.join(format!("{key}.png"));
            if !png.exists() {
                compile(dir, &key, text, dpi, latex, dvipng)?;
            }
            load_inverted(&png)
        })
    }
}

fn compile(
    dir: &Path,
    key: &str,
    text: &str,
    dpi: u32,
    latex: &str,
    dvipng: &str,
) -> Result<(), RenderError> {
    fs::create_dir_all(dir).map_err(|e| CacheError::Io {
        operation: "create directory for",
        path: dir.to_path_buf(),
        source: e,
    })?;

    let tex = dir.join(format!("{key}.tex"));
    let source = format!(r"\documentclass[12pt]{{standalone}} \begin{{document}} {text} \end{{document}}");
    fs::write(&tex, source).map_err(|e| CacheError::Io {
        operation: "write",
        path: tex.clone(),
        source: e,
    })?;

    tracing::debug!(key, "running {} for formula", latex);
    run(
        Command::new(latex)
            .args(["-halt-on-error", "-interaction=nonstopmode"])
            .arg(format!("{key}.tex"))
            .current_dir(dir),
        latex,
    )?;
    run(
        Command::new(dvipng)
            .arg("-D")
            .arg(dpi.to_string())
            .arg(format!("{key}.dvi"))
            .arg("-o")
            .arg(format!("{key}.png"))
            .current_dir(dir),
        dvipng,
    )?;
    Ok(())
}

fn run(command: &mut Command, program: &str) -> Result<(), RenderError> {
    let output = command.output().map_err(|e| RenderError::Transform {
        program: program.to_string(),
        status: "could not be started".to_string(),
        output: e.to_string(),
    })?;

    if output.status.success() {
        return Ok(());
    }

    let Output { status, stdout, stderr } = output;
    let mut text = String::from_utf8_lossy(&stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&stderr));
    tracing::warn!("{} exited with {}", program, status);
    Err(RenderError::Transform {
        program: program.to_string(),
        status: status.to_string(),
        output: text,
    })
}

/// Load a rendered formula, inverting the color channels.
fn load_inverted(path: &Path) -> Result<RgbaImage, RenderError> {
    let mut image = image::open(path)
        .map_err(|e| CacheError::Image {
            path: path.to_path_buf(),
            source: e,
        })?
        .to_rgba8();
    for pixel in image.pixels_mut() {
        for channel in &mut pixel.0[..3] {
            *channel = 255 - *channel;
        }
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    fn renderer(dir: &Path) -> LatexRenderer {
        let config = LatexConfig {
            cache_dir: Some(dir.to_path_buf()),
            ..Default::default()
        };
        LatexRenderer::new(&config)
    }

    #[test]
    fn test_existing_png_is_reused_and_inverted() {
        let dir = tempdir().unwrap();
        let mut latex = renderer(dir.path()).with_programs("no-such-latex", "no-such-dvipng");
        let key = latex.key("$x$");
        RgbaImage::from_pixel(3, 2, Rgba([255, 255, 255, 255]))
            .save(dir.path().join(format!("{key}.png")))
            .unwrap();

        let image = latex.render("$x$").unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_missing_tool_is_a_transform_error() {
        let dir = tempdir().unwrap();
        let mut latex = renderer(dir.path()).with_programs("no-such-latex", "no-such-dvipng");

        let err = latex.render("$y$").unwrap_err();
        assert!(matches!(err, RenderError::Transform { ref program, .. } if program == "no-such-latex"));
        assert!(dir.path().join(format!("{}.tex", latex.key("$y$"))).exists());
        assert!(latex.cache().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_tool_reports_status() {
        let dir = tempdir().unwrap();
        let mut latex = renderer(dir.path()).with_programs("false", "false");

        let err = latex.render(r"\undefined").unwrap_err();
        match err {
            RenderError::Transform { program, status, .. } => {
                assert_eq!(program, "false");
                assert!(status.contains('1'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
