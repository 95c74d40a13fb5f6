use crate::config::LabelConfig;
use crate::error::app_error::AppError;
use crate::models::name_entry::NameEntry;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Points to millimetres, for font sizes inside a millimetre viewBox.
const MM_PER_PT: f64 = 25.4 / 72.0;
const FIRST_NAME_PT: f64 = 22.0;
const LAST_NAME_PT: f64 = 16.0;

/// Renders badge labels as SVG files and hands them to a print command.
pub struct LabelPrinter {
    width_mm: u32,
    height_mm: u32,
    output_dir: PathBuf,
    print_command: Option<Vec<String>>,
}

impl LabelPrinter {
    pub fn new(config: &LabelConfig) -> Self {
        let print_command = config
            .print_command
            .as_deref()
            .map(|command| command.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|parts| !parts.is_empty());

        Self {
            width_mm: config.width_mm,
            height_mm: config.height_mm,
            output_dir: PathBuf::from(&config.output_dir),
            print_command,
        }
    }

    pub fn is_preview_only(&self) -> bool {
        self.print_command.is_none()
    }

    pub fn render_svg(&self, first_name: &str, last_name: &str) -> String {
        let width = f64::from(self.width_mm);
        let height = f64::from(self.height_mm);
        let centre = width / 2.0;

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">
  <text x="{centre:.2}" y="{first_y:.2}" text-anchor="middle" font-family="Helvetica, Arial, sans-serif" font-weight="bold" font-size="{first_size:.2}">{first}</text>
  <text x="{centre:.2}" y="{last_y:.2}" text-anchor="middle" font-family="Helvetica, Arial, sans-serif" font-size="{last_size:.2}">{last}</text>
</svg>
"#,
            w = self.width_mm,
            h = self.height_mm,
            centre = centre,
            first_y = height * 0.35,
            last_y = height * 0.65,
            first_size = FIRST_NAME_PT * MM_PER_PT,
            last_size = LAST_NAME_PT * MM_PER_PT,
            first = escape_xml(first_name),
            last = escape_xml(last_name),
        )
    }

    pub fn label_path(&self, entry: &NameEntry) -> PathBuf {
        self.output_dir.join(format!("label-{}.svg", entry.id))
    }

    pub async fn write_label(&self, entry: &NameEntry) -> Result<PathBuf, AppError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::label(format!("Failed to create {}", self.output_dir.display()), e))?;

        let path = self.label_path(entry);
        tokio::fs::write(&path, self.render_svg(&entry.first_name, &entry.last_name))
            .await
            .map_err(|e| AppError::label(format!("Failed to write {}", path.display()), e))?;

        debug!(entry_id = %entry.id, path = %path.display(), "label rendered");
        Ok(path)
    }

    /// Runs the configured print command with `path` appended. A no-op in
    /// preview mode.
    pub async fn print(&self, path: &Path) -> Result<(), AppError> {
        let Some((program, args)) = self.print_command.as_ref().and_then(|parts| parts.split_first()) else {
            return Ok(());
        };

        let status = Command::new(program)
            .args(args)
            .arg(path)
            .status()
            .await
            .map_err(|e| AppError::label(format!("Failed to start {}", program), e))?;

        if !status.success() {
            return Err(AppError::label(
                format!("{} exited with {}", program, status),
                std::io::Error::other("print command failed"),
            ));
        }

        info!(path = %path.display(), "label sent to printer");
        Ok(())
    }
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
