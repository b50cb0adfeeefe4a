use proptest::prelude::*;
use vreg_ovpn::ovpn::{parse, scan_directives, ConfigIssue, ValidationResult};

const CA_BLOCK: &str = "<ca>\nMIIB\n</ca>\n";

fn directive_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("client".to_string()),
        Just("dev tun".to_string()),
        Just("ca ca.crt".to_string()),
        "[a-z0-9.]{1,12}".prop_map(|h| format!("remote {}", h)),
        ("[a-z0-9.]{1,12}", 1u16..65535, prop_oneof![Just("udp"), Just("tcp")])
            .prop_map(|(h, p, t)| format!("remote {} {} {}", h, p, t)),
        (1u16..65535).prop_map(|p| format!("port {}", p)),
        prop_oneof![Just("udp"), Just("tcp"), Just("udp6"), Just("tcp6"), Just("TCP6")]
            .prop_map(|t| format!("proto {}", t)),
        "[a-z-]{1,10}( [a-z0-9]{1,6}){0,3}",
    ]
}

fn profile() -> impl Strategy<Value = String> {
    prop::collection::vec(directive_line(), 0..12).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn parse_is_pure(s in ".*") {
        prop_assert_eq!(parse(&s), parse(&s));
    }

    #[test]
    fn success_iff_no_errors(s in profile()) {
        let r = parse(&s);
        prop_assert_eq!(r.is_success(), r.errors().is_empty());
        if let ValidationResult::Failure { errors } = &r {
            prop_assert!(!errors.is_empty() && errors.len() <= 3);
        }
    }

    #[test]
    fn arbitrary_text_never_panics(s in any::<String>()) {
        let r = parse(&s);
        prop_assert!(r.errors().len() <= 3);
    }

    #[test]
    fn commenting_out_every_line_leaves_only_ca_signal(s in profile(), marker in prop_oneof![Just("#"), Just(";")]) {
        let commented: String = s
            .lines()
            .map(|l| format!("{} {}", marker, l))
            .collect::<Vec<_>>()
            .join("\n");
        let scan = scan_directives(&commented);
        prop_assert!(!scan.has_remote && !scan.has_dev && !scan.has_client && !scan.has_proto);
        prop_assert_eq!(scan.port.as_str(), "1194");
        prop_assert_eq!(scan.protocol.as_str(), "UDP");
    }

    #[test]
    fn blank_lines_are_inert(s in profile()) {
        let spaced: String = s
            .lines()
            .map(|l| format!("\n   \n{}", l))
            .collect::<String>();
        prop_assert_eq!(parse(&s), parse(&spaced));
    }

    #[test]
    fn protocol_is_normalized_for_proto_lines(
        head in profile(),
        proto in prop_oneof![Just("udp"), Just("udp6"), Just("UDP6"), Just("tcp"), Just("tcp6"), Just("Tcp6")],
    ) {
        let content = format!("{}\nremote h\ndev tun\n{}proto {}\n", head, CA_BLOCK, proto);
        let r = parse(&content);
        let d = r.descriptor().expect("complete profile");
        let expected = if proto.to_lowercase().starts_with("udp") { "UDP" } else { "TCP" };
        prop_assert_eq!(d.protocol.as_str(), expected);
    }

    #[test]
    fn trailing_port_directive_always_wins(head in profile(), port in 1u16..65535) {
        let content = format!("remote h 1 tcp\ndev tun\nca x\n{}\nport {}\n", head, port);
        let d = parse(&content).into_result().expect("complete profile");
        prop_assert_eq!(d.port, port.to_string());
    }
}

#[test]
fn missing_everything_reports_fixed_order() {
    let expected: Vec<String> = ConfigIssue::ALL.iter().map(|i| i.to_string()).collect();
    assert_eq!(parse("   \n# nothing here\n;\n").errors(), expected.as_slice());
}
