use anyhow::bail;
use log::info;
use raffle_keeper::artifacts::{render_interface, ArtifactPublisher, PublishReport};
use raffle_keeper::deploy::{deploy_mocks, deploy_raffle, Deployments};
use raffle_keeper::{KeeperConfig, LocalChain};

pub fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = KeeperConfig::from_env()?;
    if !config.network.is_development() {
        bail!(
            "{} is a live network; deploy there with the chain's own tooling",
            config.network.name
        );
    }

    let mut chain = LocalChain::new();
    let deployer = chain.account("deployer");
    let mut deployments = Deployments::default();

    deploy_mocks(&mut chain, &config.network, &deployer, &mut deployments)?;
    let raffle = deploy_raffle(&mut chain, &config.network, &deployer, &mut deployments)?;

    let publisher = ArtifactPublisher::new(config.artifacts.clone());
    match publisher.publish(&config.network.chain_id, &raffle, &render_interface()?)? {
        PublishReport::Skipped => info!("UPDATE_FRONT_END not set, skipping front end"),
        PublishReport::Published { added } => info!("Front end updated (new address: {added})"),
    }

    for name in deployments.names() {
        let deployment = deployments.get(name)?;
        println!("{name}: {} (code {})", deployment.address, deployment.code_id);
    }
    Ok(())
}
