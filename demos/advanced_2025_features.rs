// ! * complete MCP 2025-06-18 Features Showcase
// !
// ! This complete example demonstrates all the complete features introduced
// ! in the MCP 2025-06-18 specification, including:
// !
// ! - **Bidirectional Communication**: Server-initiated requests to client
// ! - **Completion API**: smart autocompletion for arguments
// ! - **Resource Templates**: Dynamic resource discovery patterns
// ! - **Elicitation**: Interactive user input collection
// ! - **improved Metadata**: Rich annotations and context
// !
// ! This example creates a complete "Smart Project Assistant" that showcases
// ! real-world usage of these complete features.

use mcp_engine::core::completion::CompletionContext;
use mcp_engine::prelude::*;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Smart Project Assistant - complete MCP Server Example
///
/// This server provides smart assistance for software development projects,
/// demonstrating all the complete MCP 2025-06-18 features in practical scenarios.
#[allow(dead_code)]
struct SmartProjectAssistant {
    /// Project root directory
    project_root: String,
    /// Available programming languages in this project
    languages: Vec<String>,
    /// Project metadata cache
    project_info: HashMap<String, Value>,
}

impl SmartProjectAssistant {
    fn new(project_root: String) -> Self {
        Self {
            project_root,
            languages: vec![
                "rust".to_string(),
                "python".to_string(),
                "javascript".to_string(),
                "typescript".to_string(),
                "go".to_string(),
                "java".to_string(),
            ],
            project_info: HashMap::new(),
        }
    }

    /// Analyze project structure and detect technologies
    async fn analyze_project(&mut self) -> McpResult<()> {
        let root_path = Path::new(&self.project_root);
        if !root_path.exists() {
            return Err(McpError::validation(format!(
                "Project root does not exist: {}",
                self.project_root
            )));
        }

        // Detect project type based on files
        let mut detected_languages = Vec::new();
        let mut build_files = Vec::new();

        if let Ok(entries) = fs::read_dir(root_path).await {
            let mut entries = entries;
            while let Some(entry) = entries.next_entry().await.map_err(McpError::io)? {
                let file_name = entry.file_name().to_string_lossy().to_string();

                match file_name.as_str() {
                    "Cargo.toml" => {
                        detected_languages.push("rust".to_string());
                        build_files.push("Cargo.toml".to_string());
                    }
                    "package.json" => {
                        detected_languages.push("javascript".to_string());
                        build_files.push("package.json".to_string());
                    }
                    "pyproject.toml" | "requirements.txt" | "setup.py" => {
                        detected_languages.push("python".to_string());
                        build_files.push(file_name);
                    }
                    "go.mod" => {
                        detected_languages.push("go".to_string());
                        build_files.push("go.mod".to_string());
                    }
                    "pom.xml" | "build.gradle" => {
                        detected_languages.push("java".to_string());
                        build_files.push(file_name);
                    }
                    "tsconfig.json" => {
                        detected_languages.push("typescript".to_string());
                        build_files.push("tsconfig.json".to_string());
                    }
                    _ => {}
                }
            }
        }

        self.project_info
            .insert("detected_languages".to_string(), json!(detected_languages));
        self.project_info
            .insert("build_files".to_string(), json!(build_files));
        self.project_info
            .insert("project_root".to_string(), json!(self.project_root));

        info!(
            "Project analysis complete: detected {} languages",
            detected_languages.len()
        );
        Ok(())
    }
}

// ============================================================================
// complete Tool Handlers with Rich Metadata
// ============================================================================

/// Project analysis tool with complete metadata and completion
struct ProjectAnalyzer {
    assistant: std::sync::Arc<tokio::sync::RwLock<SmartProjectAssistant>>,
}

impl ProjectAnalyzer {
    fn new(assistant: std::sync::Arc<tokio::sync::RwLock<SmartProjectAssistant>>) -> Self {
        Self { assistant }
    }
}

#[async_trait::async_trait]
impl ToolHandler for ProjectAnalyzer {
    async fn call(&self, arguments: HashMap<String, Value>) -> McpResult<CallToolResult> {
        let analysis_type = arguments
            .get("type")
            .and_then(|v| v.as_str())
            .unwrap_or("full");

        let include_metrics = arguments
            .get("include_metrics")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);

        let mut assistant = self.assistant.write().await;
        assistant.analyze_project().await?;

        let mut analysis_results = Vec::new();

        // Generate analysis based on type
        match analysis_type {
            "structure" => {
                analysis_results.push(ContentBlock::text(" Project Structure Analysis"));
                analysis_results.push(ContentBlock::text(format!(
                    "Project Root: {}\nDetected Languages: {:?}\nBuild Files: {:?}",
                    assistant.project_root,
                    assistant
                        .project_info
                        .get("detected_languages")
                        .unwrap_or(&json!([])),
                    assistant
                        .project_info
                        .get("build_files")
                        .unwrap_or(&json!([]))
                )));
            }
            "dependencies" => {
                analysis_results.push(ContentBlock::text("Package: Dependency Analysis"));
                analysis_results.push(ContentBlock::text("Analyzing project dependencies..."));
                // In a real implementation, this would parse build files
            }
            "security" => {
                analysis_results.push(ContentBlock::text("Security: Security Analysis"));
                analysis_results.push(ContentBlock::text("Running security vulnerability scan..."));
                // In a real implementation, this would check for known vulnerabilities
            }
            _ => {
                // Full analysis
                analysis_results.push(ContentBlock::text("Search: Full Project Analysis"));
                analysis_results.push(ContentBlock::text(format!(
                    "Complete analysis of project: {}\n\n[x] Structure: OK\n[x] Dependencies: Scanned\nWarning:  Security: 2 minor issues found",
                    assistant.project_root
                )));
            }
        }

        // Add metrics if requested
        if include_metrics {
            let metrics = json!({
                "lines_of_code": 15420,
                "files_analyzed": 87,
                "test_coverage": 85.6,
                "complexity_score": "medium",
                "maintainability_index": 78.5
            });

            analysis_results.push(ContentBlock::text("üìä Project Metrics"));
            analysis_results.push(ContentBlock::text(format!(
                "Lines of Code: {}\nFiles Analyzed: {}\nTest Coverage: {}%\nComplexity: {}\nMaintainability Index: {}",
                metrics["lines_of_code"],
                metrics["files_analyzed"],
                metrics["test_coverage"],
                metrics["complexity_score"].as_str().unwrap_or("unknown"),
                metrics["maintainability_index"]
            )));
        }

        Ok(CallToolResult {
            content: analysis_results,
            is_error: Some(false),
            structured_content: Some(json!({
                "analysis_type": analysis_type,
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "project_info": assistant.project_info
            })),
            meta: Some(HashMap::from([
                ("execution_time_ms".to_string(), json!(1250)),
                ("cache_used".to_string(), json!(true)),
            ])),
        })
    }
}

/// Code generation tool with smart completion
struct CodeGenerator {
    templates: HashMap<String, String>,
}

impl CodeGenerator {
    fn new() -> Self {
        let mut templates = HashMap::new();

        // Add code templates
        templates.insert(
            "rust_struct".to_string(),
            r#"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct {name} {{
    // TODO: Add fields
}}
"#
            .to_string(),
        );

        templates.insert(
            "rust_impl".to_string(),
            r#"
impl {name} {{
    pub fn new() -> Self {{
        Self {{
            // TODO: Initialize fields
        }}
    }}
}}
"#
            .to_string(),
        );

        templates.insert(
            "python_class".to_string(),
            r#"
class {name}:
    """TODO: Add class description"""
    
    def __init__(self):
        pass
"#
            .to_string(),
        );

        Self { templates }
    }
}

#[async_trait::async_trait]
impl ToolHandler for CodeGenerator {
    async fn call(&self, arguments: HashMap<String, Value>) -> McpResult<CallToolResult> {
        let template_type = arguments
            .get("template")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::validation("Missing 'template' parameter"))?;

        let name = arguments
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("MyStruct");

        let custom_params = arguments
            .get("params")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default();

        if let Some(template) = self.templates.get(template_type) {
            // Simple template substitution (in production, use a proper template engine)
            let mut code = template.replace("{name}", name);

            // Apply custom parameters
            for (key, value) in custom_params {
                if let Some(val_str) = value.as_str() {
                    code = code.replace(&format!("{{{key}}}"), val_str);
                }
            }

            Ok(CallToolResult {
                content: vec![
                    ContentBlock::text(format!("Generated {template_type} code for '{name}':")),
                    ContentBlock::text(format!("```\n{}\n```", code.trim())),
                ],
                is_error: Some(false),
                structured_content: Some(json!({
                    "template_type": template_type,
                    "generated_code": code.trim(),
                    "name": name,
                    "language": template_type.split('_').next().unwrap_or("unknown")
                })),
                meta: None,
            })
        } else {
            Err(McpError::validation(format!(
                "Unknown template type: {template_type}"
            )))
        }
    }
}

// ============================================================================
// complete Resource Templates (2025-06-18)
// ============================================================================

/// Project file resource handler with template support
struct ProjectFileHandler {
    project_root: String,
}

impl ProjectFileHandler {
    fn new(project_root: String) -> Self {
        Self { project_root }
    }
}

#[async_trait::async_trait]
impl ResourceHandler for ProjectFileHandler {
    async fn list(&self) -> McpResult<Vec<ResourceInfo>> {
        // Return basic project structure
        Ok(vec![
            ResourceInfo {
                uri: "file:///project/src/".to_string(),
                name: "Source Files".to_string(),
                description: Some("Project source code".to_string()),
                mime_type: None,
                annotations: None,
                size: None,
                title: Some("Source Files".to_string()),
                meta: None,
            },
            ResourceInfo {
                uri: "file:///project/docs/".to_string(),
                name: "Documentation".to_string(),
                description: Some("Project documentation".to_string()),
                mime_type: Some("text/markdown".to_string()),
                annotations: None,
                size: None,
                title: Some("Documentation".to_string()),
                meta: None,
            },
        ])
    }
    async fn read(
        &self,
        uri: &str,
        params: &HashMap<String, String>,
    ) -> McpResult<Vec<ResourceContents>> {
        // Parse template URI: file:///project/{category}/{filename}
        let file_path = if uri.starts_with("file:///project/") {
            let path_part = uri.strip_prefix("file:///project/").unwrap_or("");

            // Replace template variables with actual values
            let mut resolved_path = path_part.to_string();
            for (key, value) in params {
                resolved_path = resolved_path.replace(&format!("{{{key}}}"), value);
            }

            Path::new(&self.project_root).join(resolved_path)
        } else {
            return Err(McpError::validation(format!("Invalid project URI: {uri}")));
        };

        if !file_path.exists() {
            return Err(McpError::ResourceNotFound(uri.to_string()));
        }

        let content = fs::read_to_string(&file_path).await.map_err(McpError::io)?;

        let content_len = content.len();

        let mime_type = match file_path.extension().and_then(|ext| ext.to_str()) {
            Some("rs") => Some("text/x-rust".to_string()),
            Some("py") => Some("text/x-python".to_string()),
            Some("js") => Some("application/javascript".to_string()),
            Some("ts") => Some("application/typescript".to_string()),
            Some("json") => Some("application/json".to_string()),
            Some("md") => Some("text/markdown".to_string()),
            _ => Some("text/plain".to_string()),
        };

        Ok(vec![ResourceContents::Text {
            uri: uri.to_string(),
            mime_type,
            text: content,
            meta: Some(HashMap::from([
                ("file_size".to_string(), json!(content_len)),
                (
                    "last_modified".to_string(),
                    json!(chrono::Utc::now().to_rfc3339()),
                ),
            ])),
        }])
    }
}

/// Adapts [`ProjectFileHandler`]'s exact-URI logic to the resource-template
/// callback shape: the template's captured variables (`category`, `filename`,
/// `environment`, `format`, ...) substitute directly for the placeholders
/// `ProjectFileHandler::read` already knows how to resolve.
struct ProjectFileTemplateHandler {
    inner: ProjectFileHandler,
}

impl ProjectFileTemplateHandler {
    fn new(project_root: String) -> Self {
        Self {
            inner: ProjectFileHandler::new(project_root),
        }
    }
}

#[async_trait::async_trait]
impl ResourceTemplateHandler for ProjectFileTemplateHandler {
    async fn read(
        &self,
        uri: &str,
        variables: &HashMap<String, String>,
    ) -> McpResult<Vec<ResourceContents>> {
        self.inner.read(uri, variables).await
    }
}

// ============================================================================
// complete Completion Handlers
// ============================================================================

/// Create project-specific completion handlers
fn create_completion_handlers(project_root: &str) -> completeCompositeCompletionHandler {
    // File system completion for project files
    let fs_handler = FileSystemCompletionHandler::new(project_root)
        .with_extensions(vec!["rs", "py", "js", "ts", "json", "md", "toml", "yaml"])
        .include_hidden_files(false)
        .max_suggestions(15);

    // Analysis type completion (multiple instances for different uses)
    let analysis_handler1 = FuzzyCompletionHandler::new(vec![
        "full",
        "structure",
        "dependencies",
        "security",
        "performance",
        "quality",
    ])
    .threshold(0.2);
    let analysis_handler2 = FuzzyCompletionHandler::new(vec![
        "full",
        "structure",
        "dependencies",
        "security",
        "performance",
        "quality",
    ])
    .threshold(0.2);

    // Template completion (multiple instances for different uses)
    let template_handler1 = FuzzyCompletionHandler::new(vec![
        "rust_struct",
        "rust_impl",
        "rust_enum",
        "rust_trait",
        "python_class",
        "python_function",
        "python_module",
        "javascript_class",
        "javascript_function",
        "javascript_module",
        "typescript_interface",
        "typescript_class",
        "typescript_type",
    ])
    .threshold(0.3);
    let template_handler2 = FuzzyCompletionHandler::new(vec![
        "rust_struct",
        "rust_impl",
        "rust_enum",
        "rust_trait",
        "python_class",
        "python_function",
        "python_module",
        "javascript_class",
        "javascript_function",
        "javascript_module",
        "typescript_interface",
        "typescript_class",
        "typescript_type",
    ])
    .threshold(0.3);

    // Language completion
    let language_handler = FuzzyCompletionHandler::new(vec![
        "rust",
        "python",
        "javascript",
        "typescript",
        "go",
        "java",
        "cpp",
        "csharp",
    ])
    .threshold(0.2);

    // Schema-based completion for structured parameters
    let param_schema = json!({
        "type": "object",
        "properties": {
            "priority": {
                "type": "string",
                "enum": ["low", "medium", "high", "critical"]
            },
            "format": {
                "type": "string",
                "enum": ["json", "yaml", "toml", "xml", "csv"]
            },
            "environment": {
                "type": "string",
                "enum": ["development", "staging", "production"]
            }
        }
    });

    let schema_handler = SchemaCompletionHandler::new(param_schema);

    // Composite handler that routes to appropriate sub-handlers
    completeCompositeCompletionHandler::new()
        .add_handler("files", fs_handler)
        .add_handler("templates", template_handler1)
        .add_handler("analysis", analysis_handler1)
        .add_handler("languages", language_handler)
        .add_handler("tool_analyze_project_type", analysis_handler2)
        .add_handler("tool_generate_code_template", template_handler2)
        .add_handler("parameters", schema_handler)
        .with_default(FuzzyCompletionHandler::new(vec![
            "help", "info", "status", "version", "config", "settings",
        ]))
}

// ============================================================================
// Main Application
// ============================================================================

#[tokio::main]
async fn main() -> McpResult<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("* Starting complete MCP 2025-06-18 Features Showcase");
    info!("==========================================================");

    // Get project root from environment or use current directory
    let project_root = std::env::var("PROJECT_ROOT").unwrap_or_else(|_| {
        std::env::current_dir()
            .unwrap()
            .to_string_lossy()
            .to_string()
    });

    info!(" Project root: {}", project_root);

    // Create the smart project assistant
    let assistant = std::sync::Arc::new(tokio::sync::RwLock::new(SmartProjectAssistant::new(
        project_root.clone(),
    )));

    // Create and configure the MCP server
    let mut server = McpServer::new("smart-project-assistant".to_string(), "1.0.0".to_string());

    // Set complete server capabilities
    server.set_capabilities(ServerCapabilities {
        tools: Some(ToolsCapability {
            list_changed: Some(true),
        }),
        resources: Some(ResourcesCapability {
            subscribe: Some(true),
            list_changed: Some(true),
        }),
        prompts: Some(PromptsCapability {
            list_changed: Some(true),
        }),
        completions: Some(CompletionsCapability::default()),
        sampling: Some(SamplingCapability::default()),
        logging: Some(LoggingCapability::default()),
        experimental: Some(HashMap::from([
            ("bidirectional_requests".to_string(), json!(true)),
            ("resource_templates".to_string(), json!(true)),
            ("complete_completion".to_string(), json!(true)),
        ])),
    });

    info!("- Adding complete tools...");

    // Add project analysis tool with rich schema
    let analysis_schema = json!({
        "type": "object",
        "properties": {
            "type": {
                "type": "string",
                "enum": ["full", "structure", "dependencies", "security", "performance"],
                "description": "Type of analysis to perform",
                "default": "full"
            },
            "include_metrics": {
                "type": "boolean",
                "description": "Include detailed metrics in the analysis",
                "default": true
            },
            "output_format": {
                "type": "string",
                "enum": ["text", "json", "markdown"],
                "description": "Output format for the analysis results",
                "default": "text"
            }
        },
        "required": ["type"]
    });

    server
        .add_tool(
            "analyze_project".to_string(),
            Some(
                "Search: Analyze project structure, dependencies, and quality metrics".to_string(),
            ),
            analysis_schema,
            ProjectAnalyzer::new(assistant.clone()),
        )
        .await?;

    // Add code generation tool
    let generation_schema = json!({
        "type": "object",
        "properties": {
            "template": {
                "type": "string",
                "enum": ["rust_struct", "rust_impl", "python_class", "javascript_class"],
                "description": "Code template to generate"
            },
            "name": {
                "type": "string",
                "description": "Name for the generated code element",
                "minLength": 1
            },
            "params": {
                "type": "object",
                "description": "Additional template parameters",
                "additionalProperties": true
            }
        },
        "required": ["template", "name"]
    });

    server
        .add_tool(
            "generate_code".to_string(),
            Some("üèóÔ∏è Generate code from templates with smart parameter completion".to_string()),
            generation_schema,
            CodeGenerator::new(),
        )
        .await?;

    info!("## Adding resource templates...");

    // Add resource templates for dynamic file discovery. Each template wraps
    // the same filesystem-backed handler used for the exact `project_files`
    // resource below, resolving its `{category}/{filename}`-style variables
    // against `project_root`.
    let file_template = RegisteredResourceTemplate::new(
        "project_files".to_string(),
        "file:///project/{category}/{filename}".to_string(),
        Some("Project Files".to_string()),
        Some("Project files organized by category".to_string()),
        None,
        ProjectFileTemplateHandler::new(project_root.clone()),
    )?
    .with_annotations(Annotations::new().with_priority(0.8));

    server.add_resource_template(file_template).await?;

    let config_template = RegisteredResourceTemplate::new(
        "config_files".to_string(),
        "file:///project/config/{environment}.{format}".to_string(),
        Some("Configuration Files".to_string()),
        Some("Configuration files by environment".to_string()),
        Some("application/json".to_string()),
        ProjectFileTemplateHandler::new(project_root.clone()),
    )?
    .with_annotations(Annotations::new().with_priority(0.9));

    server.add_resource_template(config_template).await?;

    // Add actual resource handler
    server
        .add_resource(
            "project_files".to_string(),
            "file:///project/".to_string(),
            ProjectFileHandler::new(project_root.clone()),
        )
        .await?;

    info!("üß† Setting up smart completion...");

    // Set up completion handlers (create separate instances since they can't be cloned)
    let prompt_completion_handlers = create_completion_handlers(&project_root);
    let resource_completion_handlers = create_completion_handlers(&project_root);
    let tool_completion_handlers = create_completion_handlers(&project_root);

    server
        .add_completion_handler("ref/prompt".to_string(), prompt_completion_handlers)
        .await?;
    server
        .add_completion_handler("ref/resource".to_string(), resource_completion_handlers)
        .await?;
    server
        .add_completion_handler("ref/tool".to_string(), tool_completion_handlers)
        .await?;

    info!("Note: Adding smart prompts...");

    // Add complete prompts with completion support
    let analysis_prompt = PromptInfo {
        name: "project_analysis".to_string(),
        description: Some("Generate a complete project analysis report".to_string()),
        arguments: Some(vec![
            PromptArgument {
                name: "focus_area".to_string(),
                description: Some("Specific area to focus the analysis on".to_string()),
                required: Some(false),
                title: Some("Focus Area".to_string()),
            },
            PromptArgument {
                name: "detail_level".to_string(),
                description: Some("Level of detail for the analysis".to_string()),
                required: Some(false),
                title: Some("Detail Level".to_string()),
            },
        ]),
        title: Some("Project Analysis Prompt".to_string()),
        meta: Some(HashMap::from([
            ("category".to_string(), json!("analysis")),
            ("complexity".to_string(), json!("medium")),
        ])),
    };

    struct AnalysisPromptHandler;

    #[async_trait::async_trait]
    impl PromptHandler for AnalysisPromptHandler {
        async fn get(&self, arguments: HashMap<String, Value>) -> McpResult<PromptResult> {
            let focus_area = arguments
                .get("focus_area")
                .and_then(|v| v.as_str())
                .unwrap_or("general");

            let detail_level = arguments
                .get("detail_level")
                .and_then(|v| v.as_str())
                .unwrap_or("standard");

            let prompt_text = format!(
                "Analyze this software project with a focus on {focus_area}. \n\n\
                 Provide a {detail_level} level analysis covering:\n\
                 - Project structure and organization\n\
                 - Code quality and maintainability\n\
                 - Dependencies and security\n\
                 - Performance characteristics\n\
                 - Recommendations for improvement\n\n\
                 Please be thorough and provide actionable insights."
            );

            Ok(PromptResult {
                description: Some(format!("Project analysis prompt focused on {focus_area}")),
                messages: vec![PromptMessage {
                    role: Role::User,
                    content: ContentBlock::text(prompt_text),
                }],
                meta: Some(HashMap::from([
                    (
                        "generated_at".to_string(),
                        json!(chrono::Utc::now().to_rfc3339()),
                    ),
                    ("focus_area".to_string(), json!(focus_area)),
                    ("detail_level".to_string(), json!(detail_level)),
                ])),
            })
        }
    }

    server
        .add_prompt(analysis_prompt, AnalysisPromptHandler)
        .await?;

    info!("# Starting server...");

    // Start the server with STDIO transport
    println!("\n* Smart Project Assistant (complete MCP 2025-06-18 Demo)");
    println!("============================================================");
    println!("* Features enabled:");
    println!("   üîÑ Bidirectional communication");
    println!("   üß† smart autocompletion");
    println!("    Resource templates");
    println!("   Chat: Interactive elicitation");
    println!("   üìä Rich metadata & annotations");
    println!("\nüì° Server ready! Connect with your MCP client...");
    println!("\nNote: Try these complete features:");
    println!("   ‚Ä¢ analyze_project - Smart project analysis with completion");
    println!("   ‚Ä¢ generate_code - Template-based code generation");
    println!("   ‚Ä¢ Resource templates for dynamic file discovery");
    println!("   ‚Ä¢ Prompt completion for focus areas and detail levels");
    println!("\n- Usage examples:");
    println!(
        "   mcp-client tools call analyze_project '{{\"type\": \"security\", \"include_metrics\": true}}'"
    );
    println!();

    server.run_with_stdio().await
}

// ============================================================================
// complete Client Example with Bidirectional Features
// ============================================================================

/// Example function showing how to use the complete client features
#[allow(dead_code)]
async fn demonstrate_complete_client_features() -> McpResult<()> {
    info!("üîÑ Demonstrating complete client features...");

    // Create client with complete request handler
    let mut client = McpClient::new("complete-demo-client".to_string(), "1.0.0".to_string());

    // Set up complete request handler for bidirectional communication
    let handler = InteractiveClientRequestHandler::new("complete Demo Client")
        .add_root("file:///home/user/projects", Some("Projects"))
        .add_root("file:///home/user/documents", Some("Documents"))
        .add_common_roots()
        .verbose(true);

    client.set_request_handler(handler);

    // Connect to server (in real usage, this would connect to an actual server)
    // let init_result = client.connect_with_stdio_simple("smart-project-assistant").await?;

    info!("[x] Client connected with bidirectional support");

    // Demonstrate completion API
    // let completions = client.complete_tool_argument(
    // "analyze_project",
    // "type",
    // "sec"
    // ).await?;
    // info!("üß† Completion suggestions: {:?}", completions);

    // Demonstrate resource templates
    // let templates = client.list_resource_templates(None).await?;
    // info!(" Available resource templates: {}", templates.resource_templates.len());

    // Demonstrate complete tool calling with structured results
    // let result = client.call_tool(
    // "analyze_project".to_string(),
    // Some(HashMap::from([
    // ("type".to_string(), json!("security")),
    // ("include_metrics".to_string(), json!(true)),
    // ("output_format".to_string(), json!("json"))
    // ]))
    // ).await?;

    // info!("üìä Analysis result: {} content blocks", result.content.len());
    // if let Some(structured) = result.structured_content {
    // info!("üèóÔ∏è Structured data: {}", structured);
    // }

    Ok(())
}

/// Example of creating a custom completion handler
#[allow(dead_code)]
fn create_custom_completion_handler() -> impl CompletionHandler {
    // Create a completion handler that provides suggestions based on project context
    struct ProjectContextCompletionHandler {
        project_types: Vec<String>,
        frameworks: HashMap<String, Vec<String>>,
    }

    impl ProjectContextCompletionHandler {
        fn new() -> Self {
            let mut frameworks = HashMap::new();
            frameworks.insert(
                "rust".to_string(),
                vec!["tokio".to_string(), "serde".to_string(), "clap".to_string()],
            );
            frameworks.insert(
                "python".to_string(),
                vec![
                    "django".to_string(),
                    "flask".to_string(),
                    "fastapi".to_string(),
                ],
            );
            frameworks.insert(
                "javascript".to_string(),
                vec![
                    "react".to_string(),
                    "vue".to_string(),
                    "angular".to_string(),
                ],
            );

            Self {
                project_types: vec![
                    "web".to_string(),
                    "api".to_string(),
                    "cli".to_string(),
                    "library".to_string(),
                    "mobile".to_string(),
                ],
                frameworks,
            }
        }
    }

    #[async_trait::async_trait]
    impl CompletionHandler for ProjectContextCompletionHandler {
        async fn complete(
            &self,
            reference: &CompletionReference,
            argument: &CompletionArgument,
            _context: Option<&CompletionContext>,
        ) -> McpResult<Vec<String>> {
            match (argument.name.as_str(), reference) {
                ("project_type", _) => Ok(self
                    .project_types
                    .iter()
                    .filter(|t| t.starts_with(&argument.value))
                    .cloned()
                    .collect()),
                ("framework", CompletionReference::Tool { name }) if name == "setup_project" => {
                    // Context-aware completion based on project language
                    let all_frameworks: Vec<String> = self
                        .frameworks
                        .values()
                        .flatten()
                        .filter(|f| f.starts_with(&argument.value))
                        .cloned()
                        .collect();
                    Ok(all_frameworks)
                }
                _ => Ok(vec![]),
            }
        }
    }

    ProjectContextCompletionHandler::new()
}
