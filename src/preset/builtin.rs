//! The three reference deployment presets
//!
//! Positions are laid out on the 20px grid with the default card size in
//! mind: public cards stay left of x = 550 and private cards right of it,
//! with at least 40px between any two cards of the same group.

use super::{ComponentSet, PresetDefinition, ZoneSection};
use crate::model::{Boundary, Component, Connection, ContainmentRules, Placement, Positioning, Zone};

/// Ids of the built-in presets, in menu order
pub const PRESET_IDS: [&str; 3] = ["shared-saas", "dedicated-saas", "customer-hosted"];

pub fn definitions() -> Vec<PresetDefinition> {
    vec![shared_saas(), dedicated_saas(), customer_hosted()]
}

fn public(id: &str, label: &str, x: f64, y: f64) -> Component {
    Component::new(id, label, Zone::Public, x, y)
}

fn private(id: &str, label: &str, x: f64, y: f64) -> Component {
    Component::new(id, label, Zone::Private, x, y)
}

fn edges(pairs: &[(&str, &str, &str)]) -> Vec<Connection> {
    pairs
        .iter()
        .map(|(id, source, target)| Connection::new(*id, *source, *target))
        .collect()
}

fn shared_saas() -> PresetDefinition {
    let components = vec![
        public("user-public", "End Users", 20.0, 20.0)
            .with_icon("user")
            .with_description("External end users accessing the application"),
        public("cdn", "CDN", 20.0, 170.0)
            .with_icon("globe")
            .with_description("Shared CDN for all tenants"),
        public("loadbalancer", "Shared Load Balancer", 20.0, 320.0)
            .with_icon("scale")
            .with_description("Single load balancer serving all tenants")
            .with_visible(false),
        public("platform-na", "Platform (US)", 30.0, 30.0)
            .with_icon("sparkles")
            .with_description("Managed platform orchestration layer, US region")
            .in_boundary("managed-platform"),
        public("platform-eu", "Platform (EU)", 30.0, 180.0)
            .with_icon("sparkles")
            .with_description("Managed platform orchestration layer, EU region")
            .in_boundary("managed-platform")
            .with_visible(false),
        public("platform-apac", "Platform (APAC)", 30.0, 330.0)
            .with_icon("sparkles")
            .with_description("Managed platform orchestration layer, APAC region")
            .in_boundary("managed-platform")
            .with_visible(false),
        public("llm-public", "External LLM", 290.0, 530.0)
            .with_icon("robot")
            .with_description("External LLM providers")
            .with_positioning(Positioning::new("managed-platform", Placement::Below, 30.0, 40.0)),
        private("user-private", "Internal Users", 600.0, 20.0)
            .with_icon("admin")
            .with_description("Internal admins and support staff"),
        private("apigateway", "API Gateway", 600.0, 170.0)
            .with_icon("door")
            .with_description("Shared API gateway with tenant routing")
            .with_visible(false),
        private("appserver", "App Server Pool", 600.0, 320.0)
            .with_icon("server")
            .with_description("Shared application servers handling all tenant requests")
            .with_visible(false),
        private("llm-private", "Private LLM", 600.0, 470.0)
            .with_icon("brain")
            .with_description("Self-hosted LLM service for sensitive data")
            .with_visible(false),
        private("storage", "Shared Storage", 820.0, 20.0)
            .with_icon("box")
            .with_description("Object storage with bucket-level tenant isolation")
            .with_visible(false),
        private("cache", "Shared Redis", 820.0, 170.0)
            .with_icon("disk")
            .with_description("Multi-tenant cache with namespace isolation")
            .with_visible(false),
        private("database-primary", "Shared Database", 820.0, 320.0)
            .with_icon("database")
            .with_description("Multi-tenant database with row-level security")
            .with_visible(false),
        private("messagequeue", "Shared Queue", 820.0, 470.0)
            .with_icon("mailbox")
            .with_description("Multi-tenant message queue")
            .with_visible(false),
    ];

    let platform = Boundary::new(
        "managed-platform",
        "Managed Platform",
        Zone::Public,
        260.0,
        20.0,
        270.0,
        470.0,
    )
    .with_padding(30.0)
    .with_rules(
        ContainmentRules::new()
            .must_contain(["platform-na", "platform-eu", "platform-apac"])
            .must_exclude(["user-public", "cdn", "loadbalancer", "llm-public"])
            .with_description("Regional platform instances run inside the managed platform"),
    );

    PresetDefinition::new("shared-saas", "Shared SaaS", ComponentSet::Flat(components))
        .with_description("Multi-tenant shared infrastructure, cost-optimized for many customers")
        .with_boundary(platform)
        .with_connections(edges(&[
            ("e0", "user-public", "cdn"),
            ("e0b", "llm-public", "platform-na"),
            ("e1", "cdn", "platform-na"),
            ("e1b", "cdn", "loadbalancer"),
            ("e1c", "cdn", "platform-eu"),
            ("e1d", "cdn", "platform-apac"),
            ("e2", "loadbalancer", "apigateway"),
            ("e2b", "user-private", "apigateway"),
            ("e3", "apigateway", "appserver"),
            ("e4", "appserver", "cache"),
            ("e5", "appserver", "database-primary"),
            ("e6", "appserver", "messagequeue"),
            ("e7", "appserver", "storage"),
            ("e8", "appserver", "llm-public"),
            ("e9", "appserver", "llm-private"),
        ]))
}

fn dedicated_saas() -> PresetDefinition {
    let internet = ZoneSection::new(Zone::Public)
        .with_label("Internet / Public")
        .with(
            public("user-public", "End Users", 20.0, 20.0)
                .with_icon("user")
                .with_description("External end users accessing the application"),
        )
        .with(
            public("cdn", "CDN", 20.0, 170.0)
                .with_icon("globe")
                .with_description("Dedicated CDN distribution"),
        )
        .with(
            public("loadbalancer", "Dedicated LB", 20.0, 320.0)
                .with_icon("scale")
                .with_description("Customer-specific load balancer"),
        )
        .with(
            public("llm-public", "External LLM API", 20.0, 470.0)
                .with_icon("robot")
                .with_description("Public LLM API"),
        );

    let tenant = ZoneSection::new(Zone::Private)
        .with_label("Dedicated Tenant VPC")
        .with(
            private("user-private", "Internal Users", 580.0, 20.0)
                .with_icon("admin")
                .with_description("Internal admins and support staff"),
        )
        .with(
            private("apigateway", "Dedicated API Gateway", 580.0, 170.0)
                .with_icon("door")
                .with_description("Isolated API gateway for this customer"),
        )
        .with(
            private("llm-private", "Dedicated Private LLM", 580.0, 320.0)
                .with_icon("brain")
                .with_description("Customer-specific self-hosted LLM instance")
                .with_visible(false),
        )
        .with(
            private("storage", "Dedicated Storage", 580.0, 470.0)
                .with_icon("box")
                .with_description("Dedicated object storage bucket"),
        )
        .with(
            private("appserver1", "App Server 1", 20.0, 50.0)
                .with_icon("server")
                .with_description("Dedicated application server")
                .in_boundary("app-cluster"),
        )
        .with(
            private("appserver2", "App Server 2", 240.0, 50.0)
                .with_icon("server")
                .with_description("Dedicated application server for HA")
                .in_boundary("app-cluster"),
        )
        .with(
            private("cache", "Dedicated Redis", 800.0, 260.0)
                .with_icon("disk")
                .with_description("Dedicated cache instance"),
        )
        .with(
            private("database-primary", "Dedicated DB (Primary)", 1020.0, 260.0)
                .with_icon("database")
                .with_description("Dedicated database instance"),
        )
        .with(
            private("database-replica", "Dedicated DB (Replica)", 1240.0, 260.0)
                .with_icon("database")
                .with_description("Dedicated read replica")
                .with_visible(false),
        )
        .with(
            private("messagequeue", "Dedicated Queue", 800.0, 420.0)
                .with_icon("mailbox")
                .with_description("Dedicated message queue"),
        )
        .with(
            private("monitoring", "Dedicated Monitoring", 1020.0, 420.0)
                .with_icon("chart")
                .with_description("Customer-specific monitoring stack")
                .with_visible(false),
        );

    let cluster = Boundary::new(
        "app-cluster",
        "Application Cluster",
        Zone::Private,
        840.0,
        20.0,
        460.0,
        190.0,
    )
    .with_padding(20.0)
    .with_rules(
        ContainmentRules::new()
            .must_contain(["appserver1", "appserver2"])
            .must_exclude(["database-primary", "database-replica"]),
    );

    PresetDefinition::new(
        "dedicated-saas",
        "Dedicated SaaS",
        ComponentSet::Zoned(vec![internet, tenant]),
    )
    .with_description("Single-tenant dedicated infrastructure with isolated resources per customer")
    .with_boundary(cluster)
    .with_connections(
        edges(&[
            ("e0", "user-public", "cdn"),
            ("e1", "cdn", "loadbalancer"),
            ("e2", "loadbalancer", "apigateway"),
            ("e2b", "user-private", "apigateway"),
            ("e3", "apigateway", "appserver1"),
            ("e4", "apigateway", "appserver2"),
            ("e5", "appserver1", "cache"),
            ("e6", "appserver2", "cache"),
            ("e7", "appserver1", "database-primary"),
            ("e8", "appserver2", "database-primary"),
        ])
        .into_iter()
        .chain([
            Connection::new("e9", "database-primary", "database-replica").with_label("replication")
        ])
        .chain(edges(&[
            ("e10", "appserver1", "messagequeue"),
            ("e11", "appserver2", "messagequeue"),
            ("e12", "appserver1", "storage"),
            ("e13", "appserver2", "storage"),
            ("e14", "appserver1", "llm-public"),
            ("e15", "appserver2", "llm-public"),
            ("e16", "appserver1", "llm-private"),
            ("e17", "appserver2", "llm-private"),
            ("e18", "appserver1", "monitoring"),
        ])),
    )
}

fn customer_hosted() -> PresetDefinition {
    let components = vec![
        public("user-public", "Remote Users", 20.0, 20.0)
            .with_icon("user")
            .with_description("Remote users connecting via VPN"),
        public("vpn", "VPN Gateway", 20.0, 170.0)
            .with_icon("lock")
            .with_description("Secure VPN connection to the customer network"),
        public("firewall", "Firewall", 20.0, 320.0)
            .with_icon("shield")
            .with_description("Customer-managed firewall"),
        public("loadbalancer", "Load Balancer", 240.0, 170.0)
            .with_icon("scale")
            .with_description("Customer-managed load balancer"),
        public("llm-public", "External LLM API", 240.0, 320.0)
            .with_icon("robot")
            .with_description("Public LLM API, optional for air-gapped sites")
            .with_visible(false),
        private("user-private", "On-Site Users", 580.0, 20.0)
            .with_icon("admin")
            .with_description("On-premises internal users and administrators"),
        private("apigateway", "API Gateway", 580.0, 170.0)
            .with_icon("door")
            .with_description("On-premises API gateway"),
        private("llm-private", "On-Premises LLM", 580.0, 320.0)
            .with_icon("brain")
            .with_description("Fully on-premises LLM deployment"),
        private("storage", "Local Storage", 580.0, 470.0)
            .with_icon("box")
            .with_description("On-premises file storage"),
        private("appserver1", "App Server 1", 20.0, 50.0)
            .with_icon("server")
            .with_description("Customer-hosted application server")
            .in_boundary("app-tier"),
        private("appserver2", "App Server 2", 240.0, 50.0)
            .with_icon("server")
            .with_description("Customer-hosted application server")
            .in_boundary("app-tier"),
        private("appserver3", "App Server 3", 460.0, 50.0)
            .with_icon("server")
            .with_description("Customer-hosted application server")
            .in_boundary("app-tier")
            .with_visible(false),
        private("cache", "Redis Cluster", 800.0, 260.0)
            .with_icon("disk")
            .with_description("Self-managed Redis cluster"),
        private("database-primary", "Database (Primary)", 1020.0, 260.0)
            .with_icon("database")
            .with_description("Customer-managed database server"),
        private("database-replica", "Database (Replica)", 1240.0, 260.0)
            .with_icon("database")
            .with_description("Customer-managed read replica"),
        private("messagequeue", "Message Queue", 800.0, 420.0)
            .with_icon("mailbox")
            .with_description("Self-hosted message broker"),
        private("database-backup", "Backup DB", 1020.0, 420.0)
            .with_icon("disc")
            .with_description("Customer-managed backup database")
            .with_visible(false),
        private("monitoring", "Monitoring Stack", 1240.0, 420.0)
            .with_icon("chart")
            .with_description("Customer-managed monitoring"),
        private("backup-system", "Backup System", 800.0, 580.0)
            .with_icon("disk")
            .with_description("Customer backup infrastructure")
            .with_visible(false),
    ];

    let tier = Boundary::new(
        "app-tier",
        "Application Tier",
        Zone::Private,
        840.0,
        20.0,
        680.0,
        190.0,
    )
    .with_padding(20.0)
    .with_rules(
        ContainmentRules::new()
            .must_contain(["appserver1", "appserver2", "appserver3"])
            .must_exclude(["database-primary", "database-replica", "database-backup"])
            .with_description("All application servers run in the customer's app tier"),
    );

    PresetDefinition::new("customer-hosted", "Customer Hosted", ComponentSet::Flat(components))
        .with_description("On-premises or customer VPC deployment with full customer control")
        .with_boundary(tier)
        .with_connections(
            edges(&[
                ("e0", "user-public", "vpn"),
                ("e1", "vpn", "firewall"),
                ("e2", "firewall", "loadbalancer"),
                ("e2b", "user-private", "apigateway"),
                ("e3", "loadbalancer", "apigateway"),
                ("e4", "apigateway", "appserver1"),
                ("e5", "apigateway", "appserver2"),
                ("e6", "apigateway", "appserver3"),
                ("e7", "appserver1", "cache"),
                ("e8", "appserver2", "cache"),
                ("e9", "appserver3", "cache"),
                ("e10", "appserver1", "database-primary"),
                ("e11", "appserver2", "database-primary"),
                ("e12", "appserver3", "database-primary"),
            ])
            .into_iter()
            .chain([
                Connection::new("e13", "database-primary", "database-replica")
                    .with_label("replication"),
                Connection::new("e14", "database-primary", "database-backup").with_label("backup"),
            ])
            .chain(edges(&[
                ("e15", "appserver1", "messagequeue"),
                ("e16", "appserver2", "messagequeue"),
                ("e17", "appserver3", "messagequeue"),
                ("e18", "appserver1", "storage"),
                ("e19", "appserver2", "storage"),
                ("e20", "appserver3", "storage"),
                ("e21", "database-primary", "backup-system"),
                ("e22", "storage", "backup-system"),
                ("e23", "appserver1", "llm-public"),
                ("e24", "appserver2", "llm-public"),
                ("e25", "appserver3", "llm-public"),
                ("e26", "appserver1", "llm-private"),
                ("e27", "appserver2", "llm-private"),
                ("e28", "appserver3", "llm-private"),
                ("e29", "monitoring", "appserver1"),
            ])),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutConfig;

    #[test]
    fn test_catalog_order_matches_ids() {
        let ids: Vec<String> = definitions().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, PRESET_IDS);
    }

    #[test]
    fn test_every_builtin_normalizes() {
        let config = LayoutConfig::default();
        for definition in definitions() {
            let id = definition.id.clone();
            let preset = definition.normalize(&config).unwrap();
            assert!(!preset.components.is_empty(), "{id}");
        }
    }

    #[test]
    fn test_connections_reference_known_components() {
        let config = LayoutConfig::default();
        for definition in definitions() {
            let preset = definition.normalize(&config).unwrap();
            for conn in &preset.connections {
                assert!(preset.component(&conn.source).is_some(), "{}: {}", preset.id, conn.source);
                assert!(preset.component(&conn.target).is_some(), "{}: {}", preset.id, conn.target);
            }
        }
    }
}
