use super::types::Project;
use anyhow::{Context, Result};
use std::path::Path;

/// Serialization a recorded project is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Json,
    Yaml,
}

impl ProjectFormat {
    /// Pick the format from a file extension (`.side`, `.json`, `.yaml`, `.yml`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "side" | "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parse a recorded project file
pub fn parse_project_file(path: &Path) -> Result<Project> {
    let format = ProjectFormat::from_path(path)
        .with_context(|| format!("Unrecognized project file type: {}", path.display()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    parse_project_content(&content, format)
        .with_context(|| format!("Failed to parse project: {}", path.display()))
}

/// Parse project content in the given format
pub fn parse_project_content(content: &str, format: ProjectFormat) -> Result<Project> {
    let project: Project = match format {
        ProjectFormat::Json => {
            serde_json::from_str(content).context("Failed to parse JSON content")?
        }
        ProjectFormat::Yaml => {
            serde_yaml::from_str(content).context("Failed to parse YAML content")?
        }
    };

    if project.tests.is_empty() {
        log::warn!("Project '{}' contains no tests", project.name);
    }
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_project() {
        let json = r#"{
  "id": "p1",
  "name": "Shop",
  "url": "https://shop.example.com",
  "tests": [{
    "id": "t1",
    "name": "add to cart",
    "commands": [
      { "id": "c1", "command": "open", "target": "/", "value": "" },
      { "id": "c2", "command": "click", "target": "css=.buy", "value": "" }
    ]
  }]
}"#;
        let project = parse_project_content(json, ProjectFormat::Json).unwrap();
        assert_eq!(project.name, "Shop");
        assert_eq!(project.url.as_deref(), Some("https://shop.example.com"));
        assert_eq!(project.tests[0].commands.len(), 2);
        assert_eq!(project.tests[0].commands[1].name, "click");
    }

    #[test]
    fn test_parse_yaml_project() {
        let yaml = r#"
name: Login
url: https://example.com
tests:
  - name: sign in
    steps:
      - command: open
        target: /login
      - command: type
        target: id=user
        value: alice
"#;
        let project = parse_project_content(yaml, ProjectFormat::Yaml).unwrap();
        assert_eq!(project.tests[0].name, "sign in");
        assert_eq!(project.tests[0].commands[1].value.as_deref(), Some("alice"));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ProjectFormat::from_path(Path::new("suite.side")),
            Some(ProjectFormat::Json)
        );
        assert_eq!(
            ProjectFormat::from_path(Path::new("suite.YML")),
            Some(ProjectFormat::Yaml)
        );
        assert_eq!(ProjectFormat::from_path(Path::new("suite.txt")), None);
    }
}
