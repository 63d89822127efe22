use academic_calendar::{
    CalendarConfig, CalendarTemplate, PhasePlan, calendar_frame, generate, load_config_from_json,
    save_config_to_json, save_csv, save_xlsx,
};
use chrono::{Datelike, Duration, Local, NaiveDate};
use polars::prelude::{AnyValue, DataFrame};
use std::io::{self, Write};
use std::str::FromStr;

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Date(days) => {
            let epoch = NaiveDate::default();
            (epoch + Duration::days(i64::from(*days))).to_string()
        }
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect();
        cells.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for row in &cells {
        for (ci, s) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(s.len());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |values: &[String]| {
        let mut line = String::from("|");
        for (ci, s) in values.iter().enumerate() {
            line.push(' ');
            line.push_str(s);
            line.push_str(&" ".repeat(widths[ci].saturating_sub(s.len())));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(col_names.as_slice()));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_row(row.as_slice()));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Generate and show the 52-week grid\n  config show                        Show the current configuration\n  config load <json_path>            Load configuration from JSON file\n  config save <json_path>            Save configuration to JSON file\n  template list                      List available templates\n  template use <key> <start_year>    Replace configuration with a template\n  year <text...>                     Set academic year label\n  faculty <text...>                  Set faculty name\n  university <text...>               Set university name\n  batches <csv>                      Set batches, oldest first (e.g. FAS/21,FAS/22)\n  graduation <YYYY-MM-DD|none>       Set or clear the graduation date\n  it <on|off>                        Toggle industrial training\n  export <xlsx|csv> <path>           Export the generated calendar\n  quit|exit                          Exit"
    );
}

fn print_templates() {
    println!("Available templates:");
    for (key, description) in CalendarTemplate::variants() {
        println!("  {:<24} {}", key, description);
    }
}

fn print_config(config: &CalendarConfig) {
    let plan = PhasePlan::build(config);
    let graduation = config
        .graduation_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "none".to_string());
    println!("Academic year      : {}", config.academic_year);
    println!("Faculty            : {}", config.faculty);
    println!("University         : {}", config.university);
    println!("Batches            : {}", config.batches.join(", "));
    for (label, semester) in [
        ("Semester 1", &config.first_semester),
        ("Semester 2", &config.second_semester),
    ] {
        println!(
            "{:<19}: start={} weeks={} dead={} exam={} vacation={} orientation={}",
            label,
            semester.start_date,
            semester.weeks_count,
            semester.dead_weeks,
            semester.exam_weeks,
            semester.vacation_weeks,
            semester.include_orientation
        );
    }
    println!("Industrial training: {}", config.include_industrial_training);
    println!("Graduation date    : {}", graduation);
    println!("Second sem. starts : week {}", plan.second_semester_start());
    if plan.overflow_weeks() > 0 {
        println!(
            "Warning            : {} configured weeks fall past week 52 and are dropped",
            plan.overflow_weeks()
        );
    }
}

fn show_calendar(config: &CalendarConfig) {
    let weeks = match generate(config) {
        Ok(weeks) => weeks,
        Err(e) => {
            println!("Invalid configuration: {}", e);
            return;
        }
    };
    match calendar_frame(&weeks, &config.batches) {
        Ok(df) => println!("{}", render_df_as_text_table(&df)),
        Err(e) => println!("Error building grid: {}", e),
    }
}

fn parse_batches(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let mut config = CalendarTemplate::TwoSemesterIndustrial.build(Local::now().year());

    println!("Academic Calendar (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => show_calendar(&config),
            "config" => match parts.next() {
                Some("show") | None => print_config(&config),
                Some("load") => match parts.next() {
                    Some(path) => match load_config_from_json(path) {
                        Ok(loaded) => {
                            config = loaded;
                            println!("Configuration loaded from {}.", path);
                            print_config(&config);
                        }
                        Err(e) => println!("Error loading configuration: {}", e),
                    },
                    None => println!("Usage: config load <json_path>"),
                },
                Some("save") => match parts.next() {
                    Some(path) => match save_config_to_json(&config, path) {
                        Ok(_) => println!("Configuration saved to {}.", path),
                        Err(e) => println!("Error saving configuration: {}", e),
                    },
                    None => println!("Usage: config save <json_path>"),
                },
                Some(other) => {
                    println!("Unknown config command '{}'.", other);
                    println!("Usage: config show|load <json_path>|save <json_path>");
                }
            },
            "template" => match parts.next() {
                Some("list") | None => print_templates(),
                Some("use") => {
                    let key = parts.next();
                    let year_s = parts.next();
                    match (key, year_s) {
                        (Some(key), Some(year_s)) => {
                            let year: i32 = match year_s.parse() {
                                Ok(v) => v,
                                Err(_) => {
                                    println!("Invalid start year");
                                    continue;
                                }
                            };
                            match CalendarTemplate::from_str(key) {
                                Ok(template) => {
                                    config = template.build(year);
                                    println!("Applied template '{}'.", template.key());
                                    print_config(&config);
                                }
                                Err(e) => println!(
                                    "{}. Use 'template list' to list options.",
                                    e
                                ),
                            }
                        }
                        _ => println!("Usage: template use <key> <start_year>"),
                    }
                }
                Some(other) => {
                    println!("Unknown template command '{}'.", other);
                    println!("Usage: template list|use <key> <start_year>");
                }
            },
            "year" | "faculty" | "university" => {
                let rest: Vec<&str> = parts.collect();
                if rest.is_empty() {
                    println!("Usage: {} <text...>", cmd);
                    continue;
                }
                let text = rest.join(" ");
                match cmd {
                    "year" => config.academic_year = text,
                    "faculty" => config.faculty = text,
                    _ => config.university = text,
                }
                println!("{} updated.", cmd);
            }
            "batches" => match parts.next() {
                Some(csv) => {
                    let mut candidate = config.clone();
                    candidate.batches = parse_batches(csv);
                    match candidate.validate() {
                        Ok(_) => {
                            config = candidate;
                            println!("Batches set: {}", config.batches.join(", "));
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                }
                None => println!("Usage: batches <csv>"),
            },
            "graduation" => match parts.next() {
                Some("none") => {
                    config.graduation_date = None;
                    println!("Graduation date cleared.");
                }
                Some(date_s) => match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                    Ok(date) => {
                        config.graduation_date = Some(date);
                        println!("Graduation date set to {}.", date);
                    }
                    Err(_) => println!("Invalid date (YYYY-MM-DD)"),
                },
                None => println!("Usage: graduation <YYYY-MM-DD|none>"),
            },
            "it" => match parts.next() {
                Some("on") => {
                    config.include_industrial_training = true;
                    println!("Industrial training enabled.");
                }
                Some("off") => {
                    config.include_industrial_training = false;
                    println!("Industrial training disabled.");
                }
                _ => println!("Usage: it <on|off>"),
            },
            "export" => {
                let fmt = parts.next();
                let path = parts.next();
                let weeks = match generate(&config) {
                    Ok(weeks) => weeks,
                    Err(e) => {
                        println!("Invalid configuration: {}", e);
                        continue;
                    }
                };
                match (fmt, path) {
                    (Some("xlsx"), Some(path)) => match save_xlsx(&weeks, &config, path) {
                        Ok(_) => println!("Calendar exported to {}.", path),
                        Err(e) => println!("Error exporting calendar: {}", e),
                    },
                    (Some("csv"), Some(path)) => match save_csv(&weeks, &config, path) {
                        Ok(_) => println!("Calendar exported to {}.", path),
                        Err(e) => println!("Error exporting calendar: {}", e),
                    },
                    _ => println!("Usage: export <xlsx|csv> <path>"),
                }
            }
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
