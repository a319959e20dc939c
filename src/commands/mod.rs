//! CLI 명령어 핸들러 (render, compare, run, plan, list)

use crate::content::{Document, Node};
use crate::error::RundocError;
use crate::executor::{BatchResult, CommandPlan};
use crate::service::{section_filter, Service};
use anyhow::{bail, Context, Result};
use colored::*;
use std::collections::BTreeMap;
use std::io;

/// 등록된 문서 목록과 서비스를 묶는 CLI 앱
pub struct App {
    documents: BTreeMap<String, Node>,
    service: Service,
}

impl App {
    pub fn new(service: Service) -> Self {
        Self {
            documents: BTreeMap::new(),
            service,
        }
    }

    /// 문서 이름으로 등록. 같은 이름이면 덮어씁니다.
    pub fn register(&mut self, document: Document) {
        self.documents
            .insert(document.name.clone(), Node::from(document));
    }

    pub fn document_names(&self) -> Vec<&str> {
        self.documents.keys().map(String::as_str).collect()
    }

    fn find(&self, name: &str) -> Result<&Node> {
        match self.documents.get(name) {
            Some(document) => Ok(document),
            None => {
                eprintln!(
                    "{} Document '{}' not found. Use 'list' command to see available documents.",
                    "[X]".red(),
                    name
                );
                Err(RundocError::DocumentNotFound(name.to_string()).into())
            }
        }
    }

    /// 문서를 마크다운으로 렌더링해서 파일로 저장
    pub fn render(&self, name: &str, path: &str) -> Result<()> {
        let document = self.find(name)?;

        eprintln!("{} Rendering document: {}", "[>>]".cyan(), name.bold());
        eprintln!("  Output path: {}", path.dimmed());

        self.service
            .render_file(document, path)
            .context("failed to render document")?;

        eprintln!(
            "{} Successfully rendered '{}' to '{}'",
            "[OK]".green(),
            name,
            path
        );
        Ok(())
    }

    /// 렌더링 결과와 파일 내용을 비교. 다르면 에러
    pub fn compare(&self, name: &str, path: &str) -> Result<()> {
        let document = self.find(name)?;

        eprintln!("{} Comparing document: {}", "[>>]".cyan(), name.bold());
        eprintln!("  Against file: {}", path.dimmed());

        let result = match self.service.compare_file(document, path) {
            Ok(result) => result,
            Err(RundocError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                eprintln!("{} File '{}' does not exist.", "[X]".red(), path);
                Self::render_tip(name, path);
                bail!("file '{}' does not exist", path);
            }
            Err(e) => return Err(anyhow::Error::new(e).context("failed to compare file")),
        };

        if !result.matches {
            eprintln!("{} Content mismatch detected:", "[X]".red());
            eprintln!("  Document hash: {}", result.document_hash);
            eprintln!("  File hash:     {}", result.file_hash);
            Self::render_tip(name, path);
            bail!("'{}' does not match document '{}'", path, name);
        }

        eprintln!("{} File matches document content.", "[OK]".green());
        Ok(())
    }

    fn render_tip(name: &str, path: &str) {
        eprintln!(
            "{} Run {} to update the file",
            "[TIP]".cyan(),
            format!("rundoc render --doc-name '{}' --path {}", name, path).yellow()
        );
    }

    /// 문서의 실행 가능한 블록을 순서대로 실행
    pub async fn run(&self, name: &str, section: &str) -> Result<BatchResult> {
        let document = self.find(name)?;

        let batch = self
            .service
            .execute_script(document, section)
            .await
            .context("failed to execute script")?;

        for result in &batch.task_results {
            let error = match &result.error {
                None => {
                    eprintln!(
                        "{} Completed: {} (section: {})",
                        "[OK]".green(),
                        result.command,
                        result.section_name
                    );
                    continue;
                }
                Some(error) => error,
            };

            if error.contains("security validation failed") {
                eprintln!(
                    "{} Command blocked for security in section '{}': {}",
                    "[X]".red(),
                    result.section_name,
                    result.command
                );
            } else {
                eprintln!(
                    "{} Command failed in section '{}': {}",
                    "[X]".red(),
                    result.section_name,
                    result.command
                );
            }
            eprintln!("  Error: {}", error);

            if error.contains("required environment variables not set") {
                eprintln!(
                    "  {} Set the required environment variables and try again",
                    "[TIP]".cyan()
                );
            }
            eprintln!();
        }

        if !batch.all_succeeded() {
            bail!(
                "{} out of {} commands failed",
                batch.failure_count,
                batch.total
            );
        }

        eprintln!(
            "{} All {} commands completed successfully! ({}ms)",
            "[OK]".green().bold(),
            batch.total,
            batch.total_duration_ms
        );
        Ok(batch)
    }

    /// 실행 계획 출력. `json`이면 stdout에 JSON 배열로
    pub fn plan(&self, name: &str, section: &str, json: bool) -> Result<Vec<CommandPlan>> {
        let document = self.find(name)?;

        let plans = self
            .service
            .plan_script_execution(document, section)
            .context("failed to create execution plan")?;

        if json {
            println!("{}", serde_json::to_string_pretty(&plans)?);
            return Ok(plans);
        }

        eprintln!("{} Creating execution plan for: {}", "[PLAN]".cyan(), name.bold());
        let filter = section_filter(section);
        if let Some(section) = filter {
            eprintln!("  Section filter: {}", section);
        }
        eprintln!();

        if plans.is_empty() {
            eprintln!("{} No executable commands found", "[!]".yellow());
            eprintln!(
                "{} Add executable code blocks to your document to make it runnable",
                "[TIP]".cyan()
            );
            return Ok(plans);
        }

        println!("Found {} executable command(s):\n", plans.len());
        for (idx, plan) in plans.iter().enumerate() {
            println!("{}. Section: {}", idx + 1, plan.context.name);
            println!("   Shell: {}", plan.shell);
            println!("   Command: {}", plan.command_line());
            if !plan.environment.is_empty() {
                println!("   Required env vars: {:?}", plan.environment);
            }
            println!();
        }

        let mut run_hint = format!("rundoc run --doc-name '{}'", name);
        if let Some(section) = filter {
            run_hint.push_str(&format!(" --section '{}'", section));
        }
        eprintln!(
            "{} Run {} to execute these commands",
            "[TIP]".cyan(),
            run_hint.yellow()
        );

        Ok(plans)
    }

    /// 등록된 문서 이름 출력
    pub fn list(&self) {
        if self.documents.is_empty() {
            eprintln!("{} No documents registered", "[!]".yellow());
            return;
        }

        eprintln!(
            "{} Available documents ({}):\n",
            "[PKG]".cyan(),
            self.documents.len()
        );
        for name in self.document_names() {
            println!("{}", name);
        }

        eprintln!(
            "\n{} Use {} to see what commands would be run",
            "[TIP]".cyan(),
            "rundoc plan --doc-name <name>".yellow()
        );
    }
}
