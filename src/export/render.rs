//! Flattening emissions into indented source lines and laying out the class.

use anyhow::{bail, Result};

use crate::emitter::{Emission, LeveledStatement, MethodDeclaration};

/// Tracks the ambient nesting level while emissions are appended in order
#[derive(Debug, Default)]
pub struct Flattener {
    ambient: i32,
    lines: Vec<LeveledStatement>,
}

impl Flattener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, emission: &Emission) -> Result<()> {
        match emission {
            Emission::Empty => {}
            Emission::Statement(text) => self.push_line(0, text),
            Emission::Block(block) => {
                self.adjust(block.starting_level_adjustment)?;
                for line in &block.commands {
                    self.push_line(line.level, &line.text);
                }
                self.adjust(block.ending_level_adjustment)?;
            }
        }
        Ok(())
    }

    /// Lines with absolute levels; fails if a construct was left open
    pub fn finish(self) -> Result<Vec<LeveledStatement>> {
        if self.ambient != 0 {
            bail!(
                "Unbalanced control flow: {} block(s) left open",
                self.ambient
            );
        }
        Ok(self.lines)
    }

    fn adjust(&mut self, delta: i32) -> Result<()> {
        self.ambient += delta;
        if self.ambient < 0 {
            bail!("Unbalanced control flow: block closed with nothing open");
        }
        Ok(())
    }

    fn push_line(&mut self, level: usize, text: &str) {
        // `ambient` is never negative here; `adjust` rejects that
        let base = self.ambient.max(0) as usize;
        self.lines.push(LeveledStatement::new(base + level, text));
    }
}

/// A public test method of the generated class
#[derive(Debug, Clone)]
pub struct TestMethod {
    pub name: String,
    pub body: Vec<LeveledStatement>,
}

/// Writes the lines of one source file
struct SourceWriter<'a> {
    indent: &'a str,
    out: String,
}

impl<'a> SourceWriter<'a> {
    fn new(indent: &'a str) -> Self {
        Self {
            indent,
            out: String::new(),
        }
    }

    fn line(&mut self, level: usize, text: &str) {
        if !text.is_empty() {
            self.out.push_str(&self.indent.repeat(level));
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn method(&mut self, visibility: &str, signature: &str, body: &[LeveledStatement]) {
        self.line(1, &format!("{} function {}", visibility, signature));
        self.line(1, "{");
        for statement in body {
            self.line(2 + statement.level, &statement.text);
        }
        self.line(1, "}");
    }
}

/// Render the Cest class for a project
pub fn render_class(
    class_name: &str,
    indent: &str,
    tests: &[TestMethod],
    helpers: &[MethodDeclaration],
) -> String {
    let mut w = SourceWriter::new(indent);
    w.line(0, "<?php");
    w.line(0, "");
    w.line(0, "use Facebook\\WebDriver\\WebDriverBy;");
    w.line(0, "use Facebook\\WebDriver\\WebDriverKeys;");
    w.line(0, "");
    w.line(0, &format!("class {}", class_name));
    w.line(0, "{");
    w.line(1, "private $vars = [];");

    for test in tests {
        w.line(0, "");
        w.method(
            "public",
            &format!("{}(AcceptanceTester $I)", test.name),
            &test.body,
        );
    }
    for helper in helpers {
        w.line(0, "");
        w.method("private", &helper.signature(), &helper.commands);
    }

    w.line(0, "}");
    w.out
}
