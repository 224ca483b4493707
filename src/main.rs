use dialoguer::Input;
use std::fmt::Display;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vacancy_ingest::{
    config::{get_config, init_config},
    database::schema::create_database,
    models::vacancy::StoredVacancy,
    AppState,
};

fn salary(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_section<T, I>(title: &str, rows: I)
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    println!("\n{}", title);
    let mut empty = true;
    for row in rows {
        empty = false;
        println!("  {}", row);
    }
    if empty {
        println!("  (none)");
    }
}

fn vacancy_line(v: &StoredVacancy) -> String {
    format!(
        "[{}] {} | {} | {}..{} | {}",
        v.vacancy_id,
        v.vacancy_name,
        v.city.as_deref().unwrap_or("-"),
        salary(v.salary_from),
        salary(v.salary_to),
        v.vacancy_url.as_deref().unwrap_or("-"),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    init_config()?;
    let config = get_config()?;
    let state = AppState::new(config)?;

    let keyword: String = Input::new()
        .with_prompt("Keyword to search employers by")
        .allow_empty(true)
        .interact_text()?;

    let employers = state.employer_service.discover(&keyword).await?;
    let vacancies = state.vacancy_collector.collect(&employers).await?;

    create_database(&state.db).await?;
    state.persistence_service.save(&employers, &vacancies).await?;
    info!(database = %state.db.database, "Database created");

    let reports = &state.report_service;
    let counts = reports.companies_and_vacancies_count().await?;
    let listing = reports.all_vacancies().await?;
    let avg_salary = reports.avg_salary().await?;
    let higher = reports.vacancies_with_higher_salary().await?;
    let with_keyword = reports.vacancies_with_keyword(&keyword).await?;

    print_section(
        "Employers and vacancy counts:",
        counts
            .iter()
            .map(|c| format!("{}: {}", c.employer_name, c.vacancy_count)),
    );
    print_section(
        "All vacancies:",
        listing.iter().map(|v| {
            format!(
                "{} | {} | {}..{} | {}",
                v.employer_name,
                v.vacancy_name,
                salary(v.salary_from),
                salary(v.salary_to),
                v.vacancy_url.as_deref().unwrap_or("-"),
            )
        }),
    );
    match avg_salary {
        Some(avg) => println!("\nAverage salary: {}", avg),
        None => println!("\nAverage salary: no salary data"),
    }
    print_section(
        "Vacancies paying at least the average:",
        higher.iter().map(vacancy_line),
    );
    print_section(
        &format!("Vacancies mentioning {:?}:", keyword),
        with_keyword.iter().map(vacancy_line),
    );

    Ok(())
}
