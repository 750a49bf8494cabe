use amusepark_core::{
    record::BufferedRecorder, util::eval_with_recorder, Configurable, DefaultEvaluator, Env as _,
    Evaluator as _, Policy,
};
use amusepark_isoland_env::{
    IsolandEnv, IsolandEnvConfig, RandomPolicy, RandomPolicyConfig, Scenario, ScriptedPolicy,
    ScriptedPolicyConfig,
};
use anyhow::{bail, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Plays the arrow puzzle with a known solution or a random policy.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Built-in scenario, 0 or 1.
    #[arg(long, default_value_t = 0)]
    scenario: usize,

    /// YAML file of an environment configuration, overriding `--scenario`.
    /// Needs `--policy` or `--random`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// YAML file of a scripted policy configuration.
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Disables ANSI colors.
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Evaluates a random policy over this many episodes instead.
    #[arg(long)]
    random: Option<usize>,

    /// Step limit of every episode.
    #[arg(long, default_value_t = 200)]
    max_steps: usize,
}

fn play(env_config: &IsolandEnvConfig, policy: &mut ScriptedPolicy, n_steps: usize) -> Result<()> {
    let mut env = IsolandEnv::build(env_config, 0)?;
    let mut obs = env.reset()?;
    for _ in 0..n_steps {
        let act = policy.sample(&obs);
        let (step, _) = env.step(&act)?;
        println!("reward = {}", step.reward);
        if step.is_done() {
            break;
        }
        obs = step.obs;
    }
    env.close();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Known solutions apply to built-in scenarios only.
    let (env_config, actions) = match &args.config {
        Some(path) => (IsolandEnvConfig::load(path)?, None),
        None => {
            let (scenario, actions) = Scenario::builtin(args.scenario)?;
            (IsolandEnvConfig::default().scenario(scenario), Some(actions))
        }
    };
    let env_config = env_config.colored(!args.no_color);

    if let Some(n_episodes) = args.random {
        let env_config = env_config.max_steps(Some(args.max_steps));
        let n_acts = IsolandEnv::build(&env_config, 0)?.n_actions();
        let policy_config = RandomPolicyConfig { n_acts, seed: 42 };

        let mut policy = RandomPolicy::build(policy_config.clone());
        let record = DefaultEvaluator::<IsolandEnv>::new(&env_config, 0, n_episodes)?
            .evaluate(&mut policy)?;
        info!("Mean return: {}", record.get_scalar("Episode return")?);

        let mut env = IsolandEnv::build(&env_config, 0)?;
        let mut policy = RandomPolicy::build(policy_config);
        let mut recorder = BufferedRecorder::new();
        let returns = eval_with_recorder(&mut env, &mut policy, 1, &mut recorder)?;
        info!("{} steps recorded, return = {:?}", recorder.len(), returns);
        if let Some(record) = recorder.iter().last() {
            print!("{}", record.get_string("board")?);
        }
        return Ok(());
    }

    let mut policy = match (&args.policy, actions) {
        (Some(path), _) => ScriptedPolicy::build_from_path(path)?,
        (None, Some(actions)) => ScriptedPolicy::build(ScriptedPolicyConfig { actions }),
        (None, None) => bail!("--config needs --policy or --random"),
    };
    play(&env_config.render(true), &mut policy, args.max_steps)
}
