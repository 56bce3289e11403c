//! End-to-end seed scenarios exercising the coordinator facade against
//! concrete inputs, one per named scenario.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use swarm_core::{
    resolve, AgentId, Byzantine, Choice, CoordinatorConfig, CrdtType, Decision, Proposal, Quorum,
    StateVersion, Strategy, SwarmCoordinator, TopologyKind, Vote,
};

fn config(topology: TopologyKind) -> CoordinatorConfig {
    CoordinatorConfig {
        default_topology: topology,
        ..CoordinatorConfig::default()
    }
}

#[test]
fn five_agent_majority_approval() {
    let mut coordinator = SwarmCoordinator::new(config(TopologyKind::Mesh)).unwrap();
    coordinator.register_consensus_algorithm(Arc::new(Quorum::new(0.51)));

    let agents: Vec<AgentId> = (1..=5).map(|i| AgentId::new(format!("a{i}"))).collect();
    for agent in &agents {
        coordinator.register_agent(agent.clone(), HashMap::new()).unwrap();
    }

    let proposal = Proposal::new(
        agents[0].clone(),
        serde_json::json!({"action": "deploy"}),
        agents.clone(),
        Duration::from_secs(5),
    );
    let votes = vec![
        Vote::new(proposal.id, agents[0].clone(), Choice::For, 0),
        Vote::new(proposal.id, agents[1].clone(), Choice::For, 0),
        Vote::new(proposal.id, agents[2].clone(), Choice::For, 0),
        Vote::new(proposal.id, agents[3].clone(), Choice::Against, 0),
        Vote::new(proposal.id, agents[4].clone(), Choice::Abstain, 0),
    ];

    let result = coordinator.request_consensus("quorum", &proposal, &votes).unwrap();
    assert_eq!(result.decision, Decision::Approved);
    assert_eq!(result.tally.for_votes, 3.0);
    assert_eq!(result.tally.against_votes, 1.0);
    assert_eq!(result.tally.abstain_votes, 1.0);
}

#[test]
fn byzantine_seven_agents_two_malicious() {
    let mut coordinator = SwarmCoordinator::new(config(TopologyKind::Mesh)).unwrap();
    coordinator.register_consensus_algorithm(Arc::new(Byzantine::new(2, 3)));

    let honest: Vec<AgentId> = (1..=5).map(|i| AgentId::new(format!("a{i}"))).collect();
    let a6 = AgentId::new("a6");
    let a7 = AgentId::new("a7");
    let participants: Vec<AgentId> = honest.iter().cloned().chain([a6.clone(), a7.clone()]).collect();
    for agent in &participants {
        coordinator.register_agent(agent.clone(), HashMap::new()).unwrap();
    }

    let proposal = Proposal::new(participants[0].clone(), serde_json::json!("payload"), participants.clone(), Duration::from_secs(5));

    let mut votes = Vec::new();
    for round in 0..3u32 {
        for voter in &honest {
            votes.push(Vote::new(proposal.id, voter.clone(), Choice::For, round));
        }
        // a6 votes for -> against across rounds; a7 votes against -> for.
        votes.push(Vote::new(proposal.id, a6.clone(), if round == 0 { Choice::For } else { Choice::Against }, round));
        votes.push(Vote::new(proposal.id, a7.clone(), if round == 0 { Choice::Against } else { Choice::For }, round));
    }

    let result = coordinator.request_consensus("byzantine", &proposal, &votes).unwrap();
    assert_eq!(result.decision, Decision::Approved);
    assert_eq!(result.detected_malicious.len(), 2);
    assert!(result.detected_malicious.contains(&a6));
    assert!(result.detected_malicious.contains(&a7));
    assert!(result.tally.for_votes >= 5.0);
}

#[test]
fn crdt_counter_merge() {
    let versions = vec![
        StateVersion::new("requests", serde_json::json!(42), 1, AgentId::new("agent-1")).with_crdt_type(CrdtType::Counter),
        StateVersion::new("requests", serde_json::json!(38), 2, AgentId::new("agent-2")).with_crdt_type(CrdtType::Counter),
        StateVersion::new("requests", serde_json::json!(25), 3, AgentId::new("agent-3")).with_crdt_type(CrdtType::Counter),
    ];

    let resolution = resolve(&versions, Strategy::Crdt).unwrap();
    assert_eq!(resolution.value, serde_json::json!(105.0));
}

#[test]
fn topology_switch_preserves_registry() {
    let coordinator = SwarmCoordinator::new(config(TopologyKind::Mesh)).unwrap();

    let agents: Vec<AgentId> = (1..=4).map(|i| AgentId::new(format!("a{i}"))).collect();
    for agent in &agents {
        let mut metadata = HashMap::new();
        metadata.insert("role".to_string(), serde_json::json!("worker"));
        coordinator.register_agent(agent.clone(), metadata).unwrap();
    }

    coordinator.switch_topology(TopologyKind::Star).unwrap();

    assert_eq!(coordinator.registry().list_all().len(), 4);

    // a1 registered first, so it becomes the hub.
    let err = coordinator.send_message(agents[1].clone(), agents[2].clone(), serde_json::json!("hi"));
    assert!(err.is_err());

    coordinator
        .send_message(agents[1].clone(), agents[0].clone(), serde_json::json!("hi"))
        .unwrap();

    let delivered = coordinator
        .broadcast_message(agents[0].clone(), serde_json::json!("hello"), &[])
        .unwrap();
    assert_eq!(delivered, 3);
}

#[tokio::test]
async fn health_degradation_and_recovery() {
    use swarm_core::health::{HealthMonitorConfig, HealthThresholds};
    use swarm_core::registry::{AgentRegistry, HealthState};
    use swarm_core::HealthMonitor;

    // Same proportions as the spec's 10s/20s/30s thresholds, scaled down
    // to milliseconds so the test completes quickly without being so tight
    // that scheduler jitter flips a boundary.
    let thresholds = HealthThresholds {
        healthy_max: Duration::from_millis(100),
        degraded_max: Duration::from_millis(200),
        critical_max: Duration::from_millis(300),
    };
    let registry = AgentRegistry::new();
    let agent = AgentId::new("a1");
    registry.register(agent.clone(), "worker", HashMap::new()).unwrap();

    let monitor = HealthMonitor::new(
        registry.clone(),
        HealthMonitorConfig { thresholds, sweep_interval: Duration::from_millis(50) },
    );

    tokio::time::sleep(Duration::from_millis(130)).await;
    monitor.sweep();
    assert_eq!(registry.lookup(&agent).unwrap().health, HealthState::Degraded);

    tokio::time::sleep(Duration::from_millis(100)).await;
    monitor.sweep();
    assert_eq!(registry.lookup(&agent).unwrap().health, HealthState::Critical);

    tokio::time::sleep(Duration::from_millis(100)).await;
    monitor.sweep();
    assert_eq!(registry.lookup(&agent).unwrap().health, HealthState::Failed);

    registry.update_heartbeat(&agent).unwrap();
    monitor.sweep();
    assert_eq!(registry.lookup(&agent).unwrap().health, HealthState::Healthy);
}

#[tokio::test]
async fn delta_sync_after_reconnect() {
    use swarm_core::sync::InMemoryMemoryProvider;
    use swarm_core::sync::MemoryProvider as _;

    let provider = InMemoryMemoryProvider::new();
    for v in 1..=25u64 {
        provider
            .put("tasks", StateVersion::new("tasks", serde_json::json!(v), v, AgentId::new("writer")))
            .await
            .unwrap();
    }

    let newer = provider.delta("tasks", 15).await.unwrap();
    assert_eq!(newer.len(), 10);
    let versions: Vec<u64> = newer.iter().map(|v| v.version).collect();
    assert_eq!(versions, (16..=25).collect::<Vec<_>>());
}
