use std::env;
use std::process;
use vb_checker::config::compile_time::report::DEFAULT_INPUT_PATH;
use vb_checker::config::runtime::RuntimeConfig;
use vb_checker::logging::{self, codes};
use vb_checker::pipeline::{self, PipelineError, PipelineOutput};

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    input_path: Option<String>,
    json: bool,
    help: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("vb_checker");
    let options = parse_options(args.get(1..).unwrap_or(&[]));

    if options.help {
        print_help(program_name);
        return;
    }

    let config = match RuntimeConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    };

    // Preferences must be in place before the logger reads them
    if let Err(error) = logging::config::init_runtime_preferences(config.logging.clone()) {
        eprintln!("Warning: {}", error);
    }
    if let Err(error) = logging::init_global_logging() {
        eprintln!("Error: Logging initialization failed: {}", error);
        process::exit(1);
    }
    if let Err(error) = pipeline::validate_pipeline() {
        vb_checker::log_error!(codes::system::CONFIGURATION_ERROR,
            "Pipeline validation failed",
            "error" => &error
        );
        eprintln!("Error: {}", error);
        process::exit(1);
    }

    let input_path = match options.input_path {
        Some(path) => path,
        None => {
            println!(
                "No input file given, using default: {}",
                DEFAULT_INPUT_PATH
            );
            DEFAULT_INPUT_PATH.to_string()
        }
    };

    process::exit(run(&input_path, options.json, &config));
}

fn run(input_path: &str, json: bool, config: &RuntimeConfig) -> i32 {
    match pipeline::process_file_with_config(input_path, config) {
        Ok(result) => {
            let report_path = result
                .report_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();

            if result.has_errors() {
                println!("Errors found. See {}", report_path);
            } else {
                println!("Analysis completed without errors.");
            }

            if json {
                match PipelineOutput::from_result(&result).to_json_pretty() {
                    Ok(text) => println!("{}", text),
                    Err(error) => {
                        print_detailed_error(&error);
                        return 1;
                    }
                }
            }
            0
        }
        Err(error) => {
            print_detailed_error(&error);
            exit_code_for(&error)
        }
    }
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => options.help = true,
            "--json" => options.json = true,
            other if other.starts_with("--") => {
                eprintln!("Warning: Unknown option '{}'", other);
            }
            other => {
                if options.input_path.is_none() {
                    options.input_path = Some(other.to_string());
                } else {
                    eprintln!("Warning: Extra argument '{}' ignored", other);
                }
            }
        }
    }

    options
}

fn exit_code_for(error: &PipelineError) -> i32 {
    if error.is_read_failure() {
        2
    } else {
        1
    }
}

fn print_help(program_name: &str) {
    println!("VB Structural Checker v{}", env!("CARGO_PKG_VERSION"));
    println!("Static structure checks for VB console programs");
    println!();
    println!("USAGE:");
    println!("    {} [input.vb] [options]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!(
        "    [input.vb]    Source file to check (default: {})",
        DEFAULT_INPUT_PATH
    );
    println!();
    println!("OPTIONS:");
    println!("    --help        Show this help message");
    println!("    --json        Also print the analysis as JSON");
    println!();
    println!("EXIT STATUS:");
    println!("    0    Analysis completed (with or without findings)");
    println!("    1    Configuration, tokenization or report failure");
    println!("    2    Input file could not be read");
    println!();

    let pipeline_info = pipeline::get_pipeline_info();
    println!("PIPELINE CAPABILITIES:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
    println!();
    for line in logging::config::get_config_summary().lines() {
        println!("    {}", line);
    }
}

fn print_detailed_error(error: &PipelineError) {
    match error {
        PipelineError::FileProcessing(ref file_err) => {
            eprintln!("Error: Cannot read input file.");
            eprintln!("  {}", file_err);
        }
        PipelineError::LexicalAnalysis(ref lex_err) => {
            eprintln!("Tokenization stage failed:");
            eprintln!("  {}", lex_err);
        }
        PipelineError::Validation(ref validation_err) => {
            eprintln!("Structural validation setup failed:");
            eprintln!("  {}", validation_err);
        }
        PipelineError::Report(ref report_err) => {
            eprintln!("Report stage failed:");
            eprintln!("  {}", report_err);
        }
        PipelineError::Serialization { message } => {
            eprintln!("JSON output failed: {}", message);
        }
        PipelineError::Pipeline { message } => {
            eprintln!("Pipeline error: {}", message);
        }
    }
    eprintln!("  [{}]", error.error_code());
}

#[cfg(test)]
mod tests {
    use super::*;
    use vb_checker::file_processor::FileProcessorError;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(&args(&["prog.vb", "--json"]));
        assert_eq!(options.input_path.as_deref(), Some("prog.vb"));
        assert!(options.json);
        assert!(!options.help);
    }

    #[test]
    fn test_parse_options_defaults() {
        let options = parse_options(&[]);
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn test_parse_options_ignores_unknown_and_extra() {
        let options = parse_options(&args(&["a.vb", "--fast", "b.vb", "--help"]));
        assert_eq!(options.input_path.as_deref(), Some("a.vb"));
        assert!(options.help);
        assert!(!options.json);
    }

    #[test]
    fn test_exit_codes() {
        let read = PipelineError::FileProcessing(FileProcessorError::FileNotFound {
            path: "missing.vb".to_string(),
        });
        assert_eq!(exit_code_for(&read), 2);
        assert_eq!(exit_code_for(&PipelineError::pipeline_error("boom")), 1);
    }
}
