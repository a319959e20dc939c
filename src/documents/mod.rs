//! rundoc 저장소에 포함된 문서들 (README, 이슈/PR 템플릿)

use crate::content::{
    document_factory, section_factory, CodeBlockExecType, Container, Document, Frontmatter,
    ListKind, Section,
};
use crate::error::Result;
use std::collections::BTreeMap;

/// README 최상위 이름 (`--doc-name`으로 사용)
pub const README: &str = "RUNDOC";
pub const BUG_REPORT: &str = "Bug Report";
pub const PULL_REQUEST: &str = "Pull request template";

const BASIC_USAGE_SAMPLE: &str = r#"use rundoc::content::{CodeBlockExecType, Container, Document};

fn setup_doc() -> Document {
    let mut doc = Document::new("My Project");

    doc.write_intro()
        .text("Welcome to my project!")
        .text("Follow these steps to get started.");

    let setup = doc.create_section("Setup");
    setup.write_paragraph().text("First, install dependencies:");
    setup.write_code_block("bash", vec!["npm install".into()], CodeBlockExecType::Exec);

    setup.write_paragraph().text("Then start the development server:");
    setup.write_code_block("bash", vec!["npm run dev".into()], CodeBlockExecType::Exec);

    doc
}"#;

const CLI_SAMPLE: &str = r#"use rundoc::commands::App;
use rundoc::executor::TaskRunner;
use rundoc::service::{FileRepository, Service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let runner = TaskRunner::new(Default::default());
    let service = Service::with_defaults(Box::new(FileRepository::new()), Box::new(runner));

    let mut app = App::new(service);
    app.register(setup_doc());

    app.plan("My Project", "", false)?;
    Ok(())
}"#;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn installation(section: &mut Section) -> Result<()> {
    let installation = section.create_section("Installation");
    installation.write_code_block(
        "bash",
        strings(&["cargo install --path ."]),
        CodeBlockExecType::Static,
    );
    Ok(())
}

fn basic_usage(section: &mut Section) -> Result<()> {
    let basic_usage = section.create_section("Basic Usage");
    basic_usage
        .write_intro()
        .text("Create a simple document with executable commands:");
    basic_usage.write_code_block("rust", strings(&[BASIC_USAGE_SAMPLE]), CodeBlockExecType::Static);
    Ok(())
}

fn cli_usage(section: &mut Section) -> Result<()> {
    let cli = section.create_section("CLI Usage");
    cli.write_intro()
        .text("Register your documents with the CLI app:");
    cli.write_code_block("rust", strings(&[CLI_SAMPLE]), CodeBlockExecType::Static);

    let commands = cli
        .create_section("Available Commands")
        .create_table(strings(&["Command", "Description", "Example"]));
    commands.add_row([
        "render",
        "Generate markdown from document",
        "rundoc render --doc-name RUNDOC --path README.md",
    ])?;
    commands.add_row([
        "compare",
        "Compare document with existing file",
        "rundoc compare --doc-name RUNDOC --path README.md",
    ])?;
    commands.add_row([
        "run",
        "Execute all commands in document",
        "rundoc run --doc-name RUNDOC --section Development",
    ])?;
    commands.add_row([
        "plan",
        "Show execution plan without running",
        "rundoc plan --doc-name RUNDOC --json",
    ])?;
    commands.add_row(["list", "List all available documents", "rundoc list"])?;
    Ok(())
}

fn features(doc: &mut Document) -> Result<()> {
    let features = doc.create_section("Features").create_list(ListKind::Bullet);
    features
        .append("Write documentation with a typed, chainable Rust API")
        .append("Execute embedded commands to validate your docs stay current")
        .append("Generate clean markdown output for GitHub, GitLab, etc.")
        .append("Compare generated docs with existing files for CI validation")
        .append("Section-based execution for targeted testing");
    Ok(())
}

fn quick_start(doc: &mut Document) -> Result<()> {
    doc.add_section(section_factory(
        "Quick Start",
        &[&installation, &basic_usage, &cli_usage],
    )?);
    Ok(())
}

fn development(doc: &mut Document) -> Result<()> {
    let development = doc.create_section("Development");
    development
        .write_paragraph()
        .text("Check formatting and run the test suite:");
    development.write_code_block("bash", strings(&["cargo", "fmt", "--check"]), CodeBlockExecType::Exec);
    development.write_code_block("bash", strings(&["cargo", "test"]), CodeBlockExecType::Exec);

    let security = development.create_section("Execution Policy");
    security
        .write_paragraph()
        .text("Commands run under the policy in")
        .code("~/.rundoc/config.toml")
        .text("(30 second timeout, common shells only, dangerous commands blocked).");
    security.write_block_quote(
        "The policy is an allow/deny check, not a sandbox. Only run documents you trust.",
    );
    Ok(())
}

fn footer(doc: &mut Document) -> Result<()> {
    doc.create_section("Contributing")
        .write_intro()
        .text("See")
        .link("CONTRIBUTING", "./CONTRIBUTING.md")
        .text("for details.");

    doc.create_section("License")
        .write_intro()
        .text("MIT License - see")
        .link("LICENSE", "./LICENSE")
        .text("for details.");
    Ok(())
}

/// 프로젝트 README
pub fn readme() -> Result<Document> {
    let mut doc = document_factory(
        README,
        &[&features, &quick_start, &development, &footer],
    )?;

    doc.write_intro()
        .text("A lightweight tool for runnable documentation.")
        .text("Write your documentation once, then render it as markdown or execute it as a script.")
        .text("Ideal for tutorials, setup guides, and operational runbooks that need to stay up-to-date.");

    Ok(doc)
}

/// GitHub 이슈 템플릿 (front-matter 포함)
pub fn bug_report() -> Result<Document> {
    let mut doc = Document::new(BUG_REPORT);

    let mut data = BTreeMap::new();
    for (key, value) in [
        ("name", "Bug report"),
        ("about", "Report a bug"),
        ("title", ""),
        ("labels", ""),
        ("assignees", ""),
    ] {
        data.insert(key.to_string(), serde_yaml::Value::from(value));
    }
    doc.add_frontmatter(Frontmatter::new(data));

    doc.create_section("Expected behavior")
        .write_paragraph()
        .text("What should happen?");
    doc.create_section("Actual behavior")
        .write_paragraph()
        .text("What actually happens?");

    // 빈 항목은 작성자가 채울 자리
    doc.create_section("Steps to reproduce")
        .create_list(ListKind::Numbered)
        .append("")
        .append("")
        .append("");

    doc.create_section("Environment details")
        .write_paragraph()
        .text("Tell us the rustc version, OS, package version, etc.");
    doc.create_section("Code samples")
        .write_paragraph()
        .text("Share a snippet of code that demonstrates the bug.");
    doc.create_section("Error Messages")
        .write_paragraph()
        .text("Add any relevant error messages/logs here.");

    Ok(doc)
}

pub fn pull_request() -> Result<Document> {
    let mut doc = Document::new(PULL_REQUEST);

    doc.create_section("Description")
        .write_comment("What is this change and why are you making it?");
    doc.create_section("Related issue")
        .write_comment("Link to the relevant issue here.");
    doc.create_section("How I tested")
        .write_comment("How did you test these changes?");

    Ok(doc)
}

/// CLI에 등록되는 전체 문서 목록
pub fn all() -> Result<Vec<Document>> {
    Ok(vec![readme()?, bug_report()?, pull_request()?])
}
