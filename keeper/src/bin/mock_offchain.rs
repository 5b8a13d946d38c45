use anyhow::{bail, Context};
use cosmwasm_std::coins;
use raffle_keeper::deploy::{deploy_mocks, deploy_raffle, enter_raffle, Deployments};
use raffle_keeper::{Keeper, KeeperConfig, LocalChain, UpkeepOutcome};

pub fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = KeeperConfig::from_env()?;
    let network = config.network;
    if !network.is_development() {
        bail!("{} is a live network; the keeper network performs upkeep there", network.name);
    }
    let entrants: u64 = match std::env::var("RAFFLE_ENTRANTS") {
        Ok(value) => value.parse().context("RAFFLE_ENTRANTS must be a number")?,
        Err(_) => 1,
    };

    let mut chain = LocalChain::new();
    let deployer = chain.account("deployer");
    let mut deployments = Deployments::default();
    let coordinator = deploy_mocks(&mut chain, &network, &deployer, &mut deployments)?;
    let raffle = deploy_raffle(&mut chain, &network, &deployer, &mut deployments)?;

    for i in 0..entrants {
        let player = chain.account(&format!("player{i}"));
        chain.fund(&player, coins(network.entrance_fee.u128(), &network.denom))?;
        enter_raffle(&mut chain, &raffle, &player)?;
    }
    chain.advance_time(network.interval_seconds + 1);

    let keeper = Keeper::new(network, raffle, coordinator, chain.account("keeper"));
    match keeper.run_once(&mut chain)? {
        UpkeepOutcome::NotNeeded => println!("No upkeep needed!"),
        UpkeepOutcome::WinnerPicked { request, winner } => {
            println!("Request {} won by {winner}", request.request_id)
        }
    }
    Ok(())
}
