//! Universal property 1: for any descriptor and configuration, two runs
//! produce identical verdict records and identical measured statistics.

use hashcheck::blob::Blob;
use hashcheck::config::TestConfiguration;
use hashcheck::hash::{HashDescriptor, HashFn};
use hashcheck::orchestrator::TestSuite;
use std::sync::Arc;

struct XorFold32;
impl HashFn for XorFold32 {
    fn hash(&self, key: &[u8], seed: &Blob) -> Blob {
        Blob::from_bytes(32, key).xor(seed)
    }
}

fn descriptor() -> HashDescriptor {
    let probe = HashDescriptor::new("xor-fold", "", 32, 32, 0, Arc::new(XorFold32)).unwrap();
    let constant = hashcheck::verify::compute_verification_constant(&probe);
    HashDescriptor::new("xor-fold", "", 32, 32, constant, Arc::new(XorFold32)).unwrap()
}

#[test]
fn two_runs_of_the_same_suite_agree_bit_for_bit() {
    let descriptor = descriptor();
    let config = TestConfiguration {
        sanity: true,
        diff: true,
        avalanche: true,
        ..TestConfiguration::none()
    };

    let a = TestSuite::new(&descriptor, &config).run();
    let b = TestSuite::new(&descriptor, &config).run();

    assert_eq!(a, b);
    assert_eq!(a.passed(), b.passed());
}
