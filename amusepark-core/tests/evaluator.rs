use amusepark_core::{
    record::{BufferedRecorder, Record},
    util::eval_with_recorder,
    Act, DefaultEvaluator, Env, Evaluator as _, Obs, Policy, Step,
};
use anyhow::{bail, Result};
use test_log::test;

/// Counts down from `start`; action `1` decrements, `0` does nothing.
/// Reaching zero gives reward 1 and ends the episode.
struct CountdownEnv {
    start: usize,
    count: usize,
}

#[derive(Clone, Debug)]
struct CountObs(usize);

impl Obs for CountObs {
    fn len(&self) -> usize {
        1
    }
}

#[derive(Clone, Debug)]
struct CountAct(usize);

impl Act for CountAct {
    fn len(&self) -> usize {
        1
    }
}

impl Env for CountdownEnv {
    type Config = usize;
    type Obs = CountObs;
    type Act = CountAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            start: *config,
            count: *config,
        })
    }

    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        match a.0 {
            0 => {}
            1 => self.count -= 1,
            n => bail!("invalid action {}", n),
        }
        let done = self.count == 0;
        let reward = if done { 1.0 } else { 0.0 };
        let step = Step::new(CountObs(self.count), a.clone(), reward, done, false, (), None);
        Ok((step, Record::empty()))
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.count = self.start;
        Ok(CountObs(self.count))
    }

    fn step_with_reset(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)> {
        let (mut step, record) = self.step(a)?;
        if step.is_done() {
            step.init_obs = Some(self.reset()?);
        }
        Ok((step, record))
    }

    fn reset_with_index(&mut self, _ix: usize) -> Result<Self::Obs> {
        self.reset()
    }
}

/// Decrements every other call, starting with a no-op.
struct LazyPolicy {
    n_calls: usize,
    n_resets: usize,
}

impl Policy<CountdownEnv> for LazyPolicy {
    fn sample(&mut self, _obs: &CountObs) -> CountAct {
        self.n_calls += 1;
        CountAct(if self.n_calls % 2 == 0 { 1 } else { 0 })
    }

    fn reset(&mut self) {
        self.n_calls = 0;
        self.n_resets += 1;
    }
}

#[test]
fn test_default_evaluator_averages_returns() -> Result<()> {
    let mut evaluator = DefaultEvaluator::<CountdownEnv>::new(&3, 0, 4)?;
    let mut policy = LazyPolicy {
        n_calls: 0,
        n_resets: 0,
    };
    let record = evaluator.evaluate(&mut policy)?;

    assert_eq!(record.get_scalar("Episode return")?, 1.0);
    assert_eq!(policy.n_resets, 4);
    Ok(())
}

#[test]
fn test_eval_with_recorder_writes_every_step() -> Result<()> {
    let mut env = CountdownEnv::build(&2, 0)?;
    let mut policy = LazyPolicy {
        n_calls: 0,
        n_resets: 0,
    };
    let mut recorder = BufferedRecorder::new();
    let returns = eval_with_recorder(&mut env, &mut policy, 2, &mut recorder)?;

    assert_eq!(returns, vec![1.0, 1.0]);
    // Two decrements, each preceded by a no-op.
    assert_eq!(recorder.len(), 8);
    let last = recorder.iter().last().unwrap();
    assert_eq!(last.get_scalar("episode")?, 1.0);
    assert_eq!(last.get_scalar("step")?, 3.0);
    assert_eq!(last.get_scalar("reward")?, 1.0);
    Ok(())
}

#[test]
fn test_step_with_reset_fills_init_obs() -> Result<()> {
    let mut env = CountdownEnv::build(&1, 0)?;
    env.reset()?;
    let (step, _) = env.step_with_reset(&CountAct(1))?;

    assert!(step.is_done());
    assert_eq!(step.init_obs.map(|o| o.0), Some(1));
    Ok(())
}

#[test]
fn test_step_error_propagates() -> Result<()> {
    let mut env = CountdownEnv::build(&1, 0)?;
    assert!(env.step(&CountAct(7)).is_err());
    Ok(())
}
