use tracing::{debug, info};

use crate::payload::{generate_capped, payload_count};
use crate::template::replace_positions;
use crate::{AttackPosition, AttackRequest, AttackType, GenerationError};

pub fn count_requests(
    attack_type: AttackType,
    positions: &[AttackPosition],
) -> Result<usize, GenerationError> {
    let ordered = ordered_positions(positions)?;
    if attack_type == AttackType::BatteringRam {
        // Only the first position's source is ever read.
        return payload_count(&ordered[0].source);
    }
    let counts = ordered
        .iter()
        .map(|position| payload_count(&position.source))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(match attack_type {
        AttackType::Sniper => counts.iter().fold(0usize, |acc, n| acc.saturating_add(*n)),
        AttackType::BatteringRam => counts[0],
        AttackType::Pitchfork => counts.iter().copied().min().unwrap_or_default(),
        AttackType::ClusterBomb => counts.iter().fold(1usize, |acc, n| acc.saturating_mul(*n)),
    })
}

/// Expands `template` into one request per payload combination. The total is
/// checked against `max_requests` before anything is generated.
pub fn generate_attack(
    attack_type: AttackType,
    positions: &[AttackPosition],
    template: &str,
    max_requests: usize,
) -> Result<Vec<AttackRequest>, GenerationError> {
    let requested = count_requests(attack_type, positions)?;
    if requested > max_requests {
        return Err(GenerationError::LimitExceeded {
            requested,
            limit: max_requests,
        });
    }
    if requested == 0 {
        return Ok(Vec::new());
    }
    let ordered = ordered_positions(positions)?;
    let rows = match attack_type {
        AttackType::Sniper => sniper(&ordered)?,
        AttackType::BatteringRam => battering_ram(&ordered)?,
        AttackType::Pitchfork => pitchfork(&ordered, requested)?,
        AttackType::ClusterBomb => cluster_bomb(&ordered)?,
    };
    info!(
        attack = %attack_type,
        positions = ordered.len(),
        requests = rows.len(),
        "generated attack requests"
    );
    Ok(rows
        .into_iter()
        .map(|payloads| AttackRequest {
            request_content: replace_positions(template, &payloads),
            payloads,
        })
        .collect())
}

pub fn generate_attack_by_name(
    attack_type: &str,
    positions: &[AttackPosition],
    template: &str,
    max_requests: usize,
) -> Result<Vec<AttackRequest>, GenerationError> {
    let attack_type = attack_type.parse::<AttackType>()?;
    generate_attack(attack_type, positions, template, max_requests)
}

fn ordered_positions(positions: &[AttackPosition]) -> Result<Vec<&AttackPosition>, GenerationError> {
    if positions.is_empty() {
        return Err(GenerationError::NoPositions);
    }
    let mut ordered: Vec<&AttackPosition> = positions.iter().collect();
    ordered.sort_by_key(|position| position.index);
    Ok(ordered)
}

fn originals(positions: &[&AttackPosition]) -> Vec<String> {
    positions
        .iter()
        .map(|position| position.original.clone())
        .collect()
}

fn sniper(positions: &[&AttackPosition]) -> Result<Vec<Vec<String>>, GenerationError> {
    let base = originals(positions);
    let mut rows = Vec::new();
    for (slot, position) in positions.iter().enumerate() {
        let payloads = generate_capped(position, usize::MAX)?;
        debug!(position = position.index, payloads = payloads.len(), "sniper position");
        for payload in payloads {
            let mut row = base.clone();
            row[slot] = payload;
            rows.push(row);
        }
    }
    Ok(rows)
}

fn battering_ram(positions: &[&AttackPosition]) -> Result<Vec<Vec<String>>, GenerationError> {
    let payloads = generate_capped(positions[0], usize::MAX)?;
    Ok(payloads
        .into_iter()
        .map(|payload| vec![payload; positions.len()])
        .collect())
}

// Longer lists are cut to the shortest one.
fn pitchfork(
    positions: &[&AttackPosition],
    rows: usize,
) -> Result<Vec<Vec<String>>, GenerationError> {
    let columns = positions
        .iter()
        .map(|position| generate_capped(position, rows))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((0..rows)
        .map(|row| columns.iter().map(|column| column[row].clone()).collect())
        .collect())
}

fn cluster_bomb(positions: &[&AttackPosition]) -> Result<Vec<Vec<String>>, GenerationError> {
    let mut expanded: Vec<Vec<String>> = vec![Vec::with_capacity(positions.len())];
    for position in positions {
        let payloads = generate_capped(position, usize::MAX)?;
        let mut next = Vec::with_capacity(expanded.len() * payloads.len());
        for prefix in &expanded {
            for payload in &payloads {
                let mut row = prefix.clone();
                row.push(payload.clone());
                next.push(row);
            }
        }
        expanded = next;
    }
    Ok(expanded)
}
