//! Net extraction.
//!
//! Turns the geometric wire, junction, label and pin data of a sheet into
//! electrical nets. Every wire segment starts out as its own net; segments
//! that touch are merged, junctions and pins lying on a segment join its net
//! and labels name it. Finally nets carrying the same label text are unified
//! even without a geometric path between them.
//!
//! Nets live in an arena. Segments refer to their net by index and a merged
//! net's slot is emptied, so there are no shared mutable handles.

use crate::coords::CoordinateSystem;
use crate::errors::RenderWarning;
use crate::schematic::{Junction, Label, Pin, Schematic, Symbol, Wire};
use crate::symbol_index::SymbolIndex;
use crate::types::Point;

/// Tolerance for point-on-segment tests, in document units (mm).
pub const POSITION_EPSILON: f64 = 1e-9;

/// Unit direction, normal and length of a non-degenerate segment.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Axis {
    length: f64,
    dir: Point,
    normal: Point,
}

/// A straight wire piece between two points.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment<'s> {
    pub wire: &'s Wire,
    pub start: Point,
    pub end: Point,
    axis: Option<Axis>,
}

impl<'s> Segment<'s> {
    /// Segment from the first two points of a wire. A single point wire
    /// yields a degenerate segment, a wire without points none at all.
    pub fn new(wire: &'s Wire) -> Option<Self> {
        let start = *wire.pts.first()?;
        let end = wire.pts.get(1).copied().unwrap_or(start);

        let diff = end - start;
        let length = diff.length();
        let axis = (length > POSITION_EPSILON).then(|| {
            let dir = diff / length;
            Axis {
                length,
                dir,
                normal: dir.perp(),
            }
        });

        Some(Segment {
            wire,
            start,
            end,
            axis,
        })
    }

    /// A zero-length segment has no direction; it only contains its own point
    /// and is never connected to other segments.
    pub fn is_degenerate(&self) -> bool {
        self.axis.is_none()
    }

    pub fn length(&self) -> f64 {
        self.axis.map_or(0.0, |a| a.length)
    }

    /// Whether `p` lies on the segment within [`POSITION_EPSILON`].
    pub fn contains_point(&self, p: Point) -> bool {
        let rel = p - self.start;
        match self.axis {
            Some(axis) => {
                let t = rel.dot(axis.dir) / axis.length;
                let q = rel.dot(axis.normal);
                (-POSITION_EPSILON..=1.0 + POSITION_EPSILON).contains(&t)
                    && q.abs() <= POSITION_EPSILON
            }
            None => rel.x.abs() <= POSITION_EPSILON && rel.y.abs() <= POSITION_EPSILON,
        }
    }

    /// Whether either endpoint of `other` lies on this segment.
    pub fn connected_to(&self, other: &Segment<'_>) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.contains_point(other.start) || self.contains_point(other.end)
    }
}

/// Where a library pin of a placed symbol lands on the sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct PinConnection<'s> {
    pub symbol: &'s Symbol,
    pub pin: &'s Pin,
    pub position: Point,
}

impl<'s> PinConnection<'s> {
    pub fn symbol_uuid(&self) -> &'s str {
        &self.symbol.uuid
    }

    pub fn reference(&self) -> Option<&'s str> {
        self.symbol.reference()
    }

    pub fn pin_number(&self) -> &'s str {
        &self.pin.number.text
    }
}

/// All pin connection points of a placed symbol, hidden pins included.
pub fn pin_connections<'s>(
    symbol: &'s Symbol,
    index: &SymbolIndex<'s>,
    sheet: &CoordinateSystem,
) -> Vec<PinConnection<'s>> {
    let frame = sheet.symbol_frame(&symbol.at, symbol.mirror);
    index
        .symbols_for(symbol)
        .into_iter()
        .flat_map(|lib_symbol| lib_symbol.pins.iter())
        .map(|pin| PinConnection {
            symbol,
            pin,
            position: frame.point(pin.at.point()),
        })
        .collect()
}

/// One electrical node.
#[derive(Clone, Debug, PartialEq)]
pub struct Net<'s> {
    /// uuid of the wire the net grew from; internal, not a display name
    pub id: &'s str,
    pub name: Option<&'s str>,
    pub segments: Vec<Segment<'s>>,
    pub junctions: Vec<&'s Junction>,
    pub connections: Vec<PinConnection<'s>>,
}

impl<'s> Net<'s> {
    pub fn contains_wire(&self, uuid: &str) -> bool {
        self.segments.iter().any(|s| s.wire.uuid == uuid)
    }

    pub fn contains_junction(&self, uuid: &str) -> bool {
        self.junctions.iter().any(|j| j.uuid == uuid)
    }

    /// Whether pin `number` of the symbol with `reference` is on this net.
    pub fn connects_pin(&self, reference: &str, number: &str) -> bool {
        self.connections
            .iter()
            .any(|c| c.reference() == Some(reference) && c.pin_number() == number)
    }
}

/// Nets plus the problems met while building them.
#[derive(Clone, Debug, Default)]
pub struct NetList<'s> {
    pub nets: Vec<Net<'s>>,
    pub warnings: Vec<RenderWarning>,
}

impl<'s> NetList<'s> {
    pub fn net_of_wire(&self, uuid: &str) -> Option<&Net<'s>> {
        self.nets.iter().find(|n| n.contains_wire(uuid))
    }

    pub fn net_named(&self, name: &str) -> Option<&Net<'s>> {
        self.nets.iter().find(|n| n.name == Some(name))
    }
}

/// Arena slot for a net under construction; members are indices.
#[derive(Debug)]
struct NetSlot<'s> {
    id: &'s str,
    name: Option<&'s str>,
    segments: Vec<usize>,
    junctions: Vec<usize>,
    connections: Vec<usize>,
}

/// Collects wires, junctions, labels and pin connections, then resolves nets.
#[derive(Debug, Default)]
pub struct NetBuilder<'s> {
    segments: Vec<Segment<'s>>,
    junctions: Vec<&'s Junction>,
    labels: Vec<&'s Label>,
    connections: Vec<PinConnection<'s>>,
    warnings: Vec<RenderWarning>,
}

impl<'s> NetBuilder<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded with everything electrical on a sheet: wires,
    /// junctions, local and global labels, and the pins of every placed
    /// symbol found in `index`.
    pub fn from_schematic(schematic: &'s Schematic, index: &SymbolIndex<'s>) -> Self {
        let mut builder = Self::new();
        for wire in &schematic.wires {
            builder.add_wire(wire);
        }
        for junction in &schematic.junctions {
            builder.add_junction(junction);
        }
        for label in schematic.labels.iter().chain(&schematic.global_labels) {
            builder.add_label(label);
        }
        let sheet = CoordinateSystem::sheet();
        for symbol in &schematic.symbols {
            for connection in pin_connections(symbol, index, &sheet) {
                builder.add_pin_connection(connection);
            }
        }
        builder
    }

    pub fn add_wire(&mut self, wire: &'s Wire) {
        match Segment::new(wire) {
            Some(segment) => {
                if segment.is_degenerate() {
                    crate::log::warn!(uuid = %wire.uuid, "zero-length wire");
                    self.warnings.push(RenderWarning::DegenerateWire {
                        uuid: wire.uuid.clone(),
                    });
                }
                self.segments.push(segment);
            }
            None => {
                crate::log::warn!(uuid = %wire.uuid, "wire without points");
                self.warnings.push(RenderWarning::EmptyWire {
                    uuid: wire.uuid.clone(),
                });
            }
        }
    }

    pub fn add_junction(&mut self, junction: &'s Junction) {
        self.junctions.push(junction);
    }

    /// Labels with empty text are ignored.
    pub fn add_label(&mut self, label: &'s Label) {
        if !label.text.is_empty() {
            self.labels.push(label);
        }
    }

    pub fn add_pin_connection(&mut self, connection: PinConnection<'s>) {
        self.connections.push(connection);
    }

    /// Resolve nets.
    ///
    /// Runs in O(s² + s·(l + j + p)) for s segments, l labels, j junctions
    /// and p pin connections. Junctions and pins that lie on no segment
    /// belong to no net.
    pub fn build(self) -> NetList<'s> {
        let NetBuilder {
            segments,
            junctions,
            labels,
            connections,
            warnings,
        } = self;

        let mut arena = Arena::new(&segments);
        let mut junction_claimed = vec![false; junctions.len()];
        let mut connection_claimed = vec![false; connections.len()];

        for (i, segment) in segments.iter().enumerate() {
            let net = arena.net_of[i];

            if let Some(label) = labels
                .iter()
                .copied()
                .find(|label| segment.contains_point(label.at.point()))
            {
                arena.set_name(net, label.text.as_str());
            }

            for (j, junction) in junctions.iter().enumerate() {
                if !junction_claimed[j] && segment.contains_point(junction.at.point()) {
                    junction_claimed[j] = true;
                    arena.claim(net, Member::Junction(j));
                }
            }

            for (c, connection) in connections.iter().enumerate() {
                if !connection_claimed[c] && segment.contains_point(connection.position) {
                    connection_claimed[c] = true;
                    arena.claim(net, Member::Connection(c));
                }
            }

            for (k, other) in segments.iter().enumerate() {
                if segment.connected_to(other) {
                    // an earlier merge in this loop may have moved segment i
                    let into = arena.net_of[i];
                    let from = arena.net_of[k];
                    arena.merge(into, from);
                }
            }
        }

        // Unify by identity or by equal name, in segment order
        let mut order: Vec<usize> = Vec::new();
        for i in 0..segments.len() {
            let net = arena.net_of[i];
            let name = arena.name(net);
            let same = order
                .iter()
                .copied()
                .find(|&o| o == net || (name.is_some() && arena.name(o) == name));
            match same {
                Some(o) => arena.merge(o, net),
                None => order.push(net),
            }
        }

        let nets: Vec<Net<'s>> = order
            .into_iter()
            .filter_map(|idx| arena.slots[idx].take())
            .map(|slot| Net {
                id: slot.id,
                name: slot.name,
                segments: slot.segments.iter().map(|&s| segments[s].clone()).collect(),
                junctions: slot.junctions.iter().map(|&j| junctions[j]).collect(),
                connections: slot
                    .connections
                    .iter()
                    .map(|&c| connections[c].clone())
                    .collect(),
            })
            .collect();

        crate::log::debug!(
            nets = nets.len(),
            segments = segments.len(),
            "extracted nets"
        );

        NetList { nets, warnings }
    }
}

#[derive(Clone, Copy, Debug)]
enum Member {
    Junction(usize),
    Connection(usize),
}

/// Net slots plus the segment → slot mapping.
struct Arena<'s> {
    slots: Vec<Option<NetSlot<'s>>>,
    net_of: Vec<usize>,
}

impl<'s> Arena<'s> {
    fn new(segments: &[Segment<'s>]) -> Self {
        let slots = segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                Some(NetSlot {
                    id: segment.wire.uuid.as_str(),
                    name: None,
                    segments: vec![i],
                    junctions: Vec::new(),
                    connections: Vec::new(),
                })
            })
            .collect();
        Arena {
            slots,
            net_of: (0..segments.len()).collect(),
        }
    }

    fn set_name(&mut self, net: usize, name: &'s str) {
        if let Some(slot) = self.slots[net].as_mut() {
            slot.name = Some(name);
        }
    }

    fn claim(&mut self, net: usize, member: Member) {
        if let Some(slot) = self.slots[net].as_mut() {
            match member {
                Member::Junction(j) => slot.junctions.push(j),
                Member::Connection(c) => slot.connections.push(c),
            }
        }
    }

    fn name(&self, net: usize) -> Option<&'s str> {
        self.slots[net].as_ref().and_then(|slot| slot.name)
    }

    /// Move every member of `from` into `into`. `into` keeps its name if it
    /// has one. Merging a net with itself does nothing.
    fn merge(&mut self, into: usize, from: usize) {
        if into == from {
            return;
        }
        let Some(absorbed) = self.slots[from].take() else {
            return;
        };
        for &segment in &absorbed.segments {
            self.net_of[segment] = into;
        }
        if let Some(target) = self.slots[into].as_mut() {
            target.segments.extend(absorbed.segments);
            target.junctions.extend(absorbed.junctions);
            target.connections.extend(absorbed.connections);
            if target.name.is_none() {
                target.name = absorbed.name;
            }
        }
    }
}
