use cross_otlp_logger::config::{Config, LogFormat};
use cross_otlp_logger::{function_handler, JsonLines, KinesisStreamEvent, TracingEmitter};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    let subscriber = tracing_subscriber::fmt().with_max_level(config.log_level);
    match config.log_format {
        // one JSON object per line; CloudWatch adds the ingestion time.
        LogFormat::Json => subscriber.event_format(JsonLines).init(),
        LogFormat::Text => subscriber
            // disable printing the name of the module in every log line.
            .with_target(false)
            // disabling time is handy because CloudWatch will add the ingestion time.
            .without_time()
            .init(),
    }

    let emitter = TracingEmitter::new(config.service_name);
    let emitter = &emitter;
    run(service_fn(move |event: LambdaEvent<KinesisStreamEvent>| async move {
        function_handler(emitter, event).await
    }))
    .await
}
