use crate::inventory::{Subnet, Vpc};

/// Subnets per visibility expected in a primary VPC, one per availability zone.
const SUBNETS_PER_VISIBILITY: usize = 3;

/// Returns the first non-default VPC with exactly three public and three
/// private subnets. Finding none is an ordinary outcome, not an error.
pub fn select_primary(vpcs: &[Vpc]) -> Option<&Vpc> {
    vpcs.iter().find(|vpc| is_primary_candidate(vpc))
}

fn is_primary_candidate(vpc: &Vpc) -> bool {
    let (public, private) = partition_subnets(&vpc.subnets);

    return !vpc.is_default
        && public.len() == SUBNETS_PER_VISIBILITY
        && private.len() == SUBNETS_PER_VISIBILITY;
}

/// Splits subnets into `(public, private)`, keeping input order in each.
pub fn partition_subnets(subnets: &[Subnet]) -> (Vec<&Subnet>, Vec<&Subnet>) {
    subnets.iter().partition(|subnet| subnet.is_public)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{partition_subnets, select_primary};
    use crate::inventory::{Subnet, Vpc};

    pub(crate) fn vpc(
        id: &str,
        account_id: &str,
        is_default: bool,
        public: &[&str],
        private: &[&str],
    ) -> Vpc {
        let public = public.iter().map(|id| Subnet {
            subnet_id: id.to_string(),
            is_public: true,
        });
        let private = private.iter().map(|id| Subnet {
            subnet_id: id.to_string(),
            is_public: false,
        });

        return Vpc {
            vpc_id: id.to_string(),
            account_id: account_id.to_string(),
            is_default,
            subnets: public.chain(private).collect(),
        };
    }

    #[test]
    fn selects_three_by_three_vpc() {
        let vpcs = vec![vpc("vpc-1", "123", false, &["a", "b", "c"], &["x", "y", "z"])];

        let primary = select_primary(&vpcs).unwrap();
        assert_eq!("vpc-1", primary.vpc_id);
    }

    #[test]
    fn never_selects_default_vpc() {
        let vpcs = vec![vpc("vpc-1", "123", true, &["a", "b", "c"], &["x", "y", "z"])];

        assert_eq!(None, select_primary(&vpcs));
    }

    #[test]
    fn requires_exactly_three_of_each() {
        let vpcs = vec![
            vpc("two-public", "123", false, &["a", "b"], &["x", "y", "z"]),
            vpc("four-private", "123", false, &["a", "b", "c"], &["w", "x", "y", "z"]),
            vpc("six-public", "123", false, &["a", "b", "c", "d", "e", "f"], &[]),
        ];

        assert_eq!(None, select_primary(&vpcs));
    }

    #[test]
    fn first_match_wins() {
        let vpcs = vec![
            vpc("default", "123", true, &["a", "b", "c"], &["x", "y", "z"]),
            vpc("first", "123", false, &["a", "b", "c"], &["x", "y", "z"]),
            vpc("second", "123", false, &["d", "e", "f"], &["u", "v", "w"]),
        ];

        assert_eq!("first", select_primary(&vpcs).unwrap().vpc_id);
        // Same input, same answer.
        assert_eq!(select_primary(&vpcs), select_primary(&vpcs));
    }

    #[test]
    fn interleaved_subnets_still_count() {
        let mut candidate = vpc("vpc-1", "123", false, &["a", "b", "c"], &["x", "y", "z"]);
        candidate.subnets.swap(0, 5);
        candidate.subnets.swap(1, 3);

        assert_eq!(true, select_primary(&[candidate]).is_some());
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert_eq!(None, select_primary(&[]));
    }

    #[test]
    fn partition_keeps_input_order() {
        let mut mixed = vpc("vpc-1", "123", false, &["a", "b"], &["x", "y"]);
        mixed.subnets.swap(0, 2);

        let (public, private) = partition_subnets(&mixed.subnets);
        let public: Vec<&str> = public.iter().map(|s| s.subnet_id.as_str()).collect();
        let private: Vec<&str> = private.iter().map(|s| s.subnet_id.as_str()).collect();

        assert_eq!(vec!["b", "a"], public);
        assert_eq!(vec!["x", "y"], private);
    }
}
