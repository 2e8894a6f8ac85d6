//! Runs one of the fraud network queries and prints the resulting distribution.

use varelim::render::TableDisplay;
use varelim::samplers::{self, ForwardSampler, Sampler};
use varelim::scenarios::{self, Parameters};
use varelim::{Assignment, ConditionalInferenceEngine, VariableEliminationEngine};

use clap::Parser;
use env_logger::{Builder, Env};
use log::info;

use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about = "Exact inference on the credit card fraud network by variable elimination", long_about = None)]
struct Args {
    /// Query to run (1-4)
    scenario: u32,

    /// Use the realistic probability tables instead of the textbook ones
    #[arg(long)]
    realistic: bool,

    /// Let the engine choose the elimination order instead of the query's own
    #[arg(long)]
    auto_order: bool,

    /// Draw this many forward samples and report the empirical frequency
    #[arg(long, default_value_t = 0)]
    samples: usize,

    /// Seed for the forward sampler
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let parameters = if args.realistic { Parameters::Realistic } else { Parameters::Textbook };
    let factors = scenarios::fraud_network(parameters)?;
    let query = scenarios::query(args.scenario)?;
    info!("scenario {}: {} ({:?} tables)", query.number, query.description, parameters);

    for f in factors.iter() {
        println!("{}", f);
        print!("{}", TableDisplay(f));
        println!();
    }

    let result = if args.auto_order {
        let evidence = Assignment::from_pairs(&query.evidence)?;
        let variables: Vec<String> = query.query.iter().map(|v| v.to_string()).collect();
        VariableEliminationEngine::new(&factors, &evidence).infer(&variables)?
    } else {
        query.run(&factors)?
    };

    println!("{}", result);
    print!("{}", TableDisplay(&result));

    if args.samples > 0 {
        let samples = match args.seed {
            Some(seed) => ForwardSampler::seeded(&factors, seed)?.samples(args.samples),
            None => ForwardSampler::new(&factors)?.samples(args.samples)
        };

        let evidence = Assignment::from_pairs(&query.evidence)?;
        for var in query.query.iter() {
            match samplers::frequency(&samples, var, &evidence) {
                Some(p) => info!("empirical P(+{}) = {:.5} from {} samples", var.to_lowercase(), p, samples.len()),
                None => info!("no sample is consistent with the evidence")
            }
        }
    }

    Ok(())
}
