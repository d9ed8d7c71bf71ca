use mlapi_http::{ClientConfig, ClientOptions, Job, MlApiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = std::env::var("MLAPI_URL")?;
    let token = std::env::var("MLAPI_TOKEN")?;

    let client = MlApiClient::new(
        url,
        ClientConfig::bearer(token).with_options(ClientOptions {
            max_retries: 2,
            ..ClientOptions::default()
        }),
    )?;

    let info = client.tenant_info().await?;
    println!(
        "limits: {} series per job, {} per outlier detector",
        info.max_series_per_job, info.max_series_per_outlier
    );

    let job = client
        .new_job(&Job {
            name: "demo forecast".to_owned(),
            metric: "demo_requests_total".to_owned(),
            datasource_type: "prometheus".to_owned(),
            datasource_uid: std::env::var("MLAPI_DATASOURCE_UID")?,
            interval: 300,
            training_window: 90 * 24 * 3600,
            training_frequency: 24 * 3600,
            algorithm: "grafana_prophet_1_0_1".to_owned(),
            ..Job::default()
        })
        .await?;
    println!("created job {}", job.id);

    for job in client.jobs().await? {
        println!("{} {}", job.id, job.name);
    }

    client.delete_job(&job.id).await?;
    Ok(())
}
