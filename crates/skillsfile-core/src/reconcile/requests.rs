//! Reconciliation of qualification ↔ company request relationships.

use std::collections::HashSet;

use super::{reconcile, Reconciliation};
use crate::models::{QualificationCompanyRequest, RequiredQualification};

/// Relationship merge result plus the rows dropped for missing parents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestReconciliation {
    pub reconciliation: Reconciliation<QualificationCompanyRequest>,
    /// `(qual_uid, company_uid)` pairs whose qualification or company does
    /// not exist locally after the parent entities were reconciled.
    pub orphans: Vec<(String, String)>,
}

/// Merge every company request embedded in `qualifications` into the local
/// relationship rows.
///
/// Must run after companies and qualifications have been applied:
/// `known_qualifications` and `known_companies` are the post-reconciliation
/// local key sets. A request whose parent is missing from either set yields
/// no operation and is reported as an orphan. Requests with a blank company
/// uid are rejected by validation rather than treated as orphans.
pub fn reconcile_requests(
    qualifications: &[RequiredQualification],
    local: &[QualificationCompanyRequest],
    known_qualifications: &HashSet<String>,
    known_companies: &HashSet<String>,
) -> RequestReconciliation {
    let mut orphans = Vec::new();
    let mut remote = Vec::new();

    for request in qualifications
        .iter()
        .flat_map(|qualification| qualification.request_records())
    {
        let blank = request.company_uid.trim().is_empty() || request.qual_uid.trim().is_empty();
        let has_parents = known_qualifications.contains(&request.qual_uid)
            && known_companies.contains(&request.company_uid);

        if blank || has_parents {
            remote.push(request);
        } else {
            orphans.push((request.qual_uid, request.company_uid));
        }
    }

    RequestReconciliation {
        reconciliation: reconcile(local, &remote),
        orphans,
    }
}
