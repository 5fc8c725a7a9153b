//! Command-line interface for kafka-testkit
//!
//! Every command reads `testconf.json` (or `--testconf` / `$KAFKA_TESTCONF`).
//! If the file does not exist the command does nothing and exits 0, so it can
//! be chained into test scripts that should skip without a cluster.
//!
//! # Usage Examples
//!
//! ```bash
//! # Count messages in the configured topic
//! kafka-testkit count
//!
//! # Producer throughput with the PerfMsgCount/PerfMsgSize from testconf
//! kafka-testkit produce
//!
//! # Consumer throughput, giving up after 30s of silence
//! kafka-testkit consume --topic perf --count 50000 --idle-timeout-secs 30
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use kafka_perf::{ensure_topic, ConsumeArgs, ConsumerWorkload, ProduceArgs, ProducerWorkload};
use kafka_testconf::TestConfig;
use kafka_topic_counter::count_messages_in_topic;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kafka-testkit")]
#[command(about = "Kafka test suite utilities: throughput workloads and topic message counts")]
#[command(long_about = None)]
struct Cli {
    /// Path to the test configuration file
    #[arg(
        long,
        global = true,
        env = "KAFKA_TESTCONF",
        default_value = kafka_testconf::DEFAULT_PATH
    )]
    testconf: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the approximate number of messages in a topic (wrong for compacted topics)
    Count {
        /// Topic to count (default: Topic from testconf)
        #[arg(long)]
        topic: Option<String>,
    },

    /// Run the producer throughput workload
    Produce(ProduceArgs),

    /// Run the consumer throughput workload
    Consume(ConsumeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let Some(config) = TestConfig::load_from(&cli.testconf)
        .with_context(|| format!("Unusable test configuration {}", cli.testconf.display()))?
    else {
        eprintln!("% {} not found - nothing to do", cli.testconf.display());
        return Ok(());
    };

    match cli.command {
        Commands::Count { topic } => {
            let topic = topic.unwrap_or_else(|| config.topic.clone());
            let count_topic = topic.clone();
            // Metadata and watermark lookups block for up to their timeout
            let count =
                tokio::task::spawn_blocking(move || count_messages_in_topic(&config, &count_topic))
                    .await
                    .context("Message count task failed")?
                    .with_context(|| format!("Failed to count messages in '{topic}'"))?;

            println!(
                "Topic {topic}: ~{} messages ({} partitions, {} skipped)",
                count.total,
                count.partitions,
                count.skipped.len()
            );
        }
        Commands::Produce(args) => {
            let topic = args.topic(&config);
            ensure_topic(&config, topic, args.partitions).await?;

            let report = ProducerWorkload::new(&config)?
                .with_batch_size(args.batch_size)
                .run(topic, args.count(&config), args.size(&config))
                .await
                .with_context(|| format!("Producer workload on '{topic}' failed"))?;

            tracing::info!(
                "Produced {} messages ({} bytes) in {:?} ({:.2} msg/sec)",
                report.messages,
                report.bytes,
                report.duration,
                report.messages_per_second()
            );
        }
        Commands::Consume(args) => {
            let topic = args.topic(&config);
            let report = ConsumerWorkload::new(&config)?
                .run(topic, args.count(&config), args.idle_timeout())
                .await
                .with_context(|| format!("Consumer workload on '{topic}' failed"))?;

            tracing::info!(
                "Consumed {} messages ({} bytes) in {:?} ({:.2} msg/sec)",
                report.messages,
                report.bytes,
                report.duration,
                report.messages_per_second()
            );
        }
    }

    Ok(())
}
