/*!
Bounded reads over byte buffers and NLRI decoding helpers.

Every read checks the remaining length first, so a lying length field
surfaces as a [`ParserError::TruncatedMsg`] instead of a panic. The trait
is implemented for anything that implements [`Buf`]; record decoding slices
sub-regions out of the payload with `split_to` and hands them to these
functions.
*/
use crate::error::ParserError;
use crate::models::*;
use bytes::{Buf, Bytes};
use ipnet::IpNet;
use itertools::Itertools;
use log::debug;
use smallvec::SmallVec;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

pub trait ReadUtils: Buf {
    #[inline]
    fn require_n_remaining(&self, n: usize) -> Result<(), ParserError> {
        if self.remaining() < n {
            return Err(ParserError::TruncatedMsg(format!(
                "Insufficient buffer {} < {}",
                self.remaining(),
                n
            )));
        }
        Ok(())
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, ParserError> {
        self.require_n_remaining(1)?;
        Ok(self.get_u8())
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16, ParserError> {
        self.require_n_remaining(2)?;
        Ok(self.get_u16())
    }

    /// 3-byte big-endian read, used by MPLS labels and the RIB_GENERIC AFI
    /// field.
    #[inline]
    fn read_u24(&mut self) -> Result<u32, ParserError> {
        self.require_n_remaining(3)?;
        let high = self.get_u8() as u32;
        let low = self.get_u16() as u32;
        Ok((high << 16) | low)
    }

    #[inline]
    fn read_u32(&mut self) -> Result<u32, ParserError> {
        self.require_n_remaining(4)?;
        Ok(self.get_u32())
    }

    #[inline]
    fn read_u64(&mut self) -> Result<u64, ParserError> {
        self.require_n_remaining(8)?;
        Ok(self.get_u64())
    }

    fn read_n_bytes(&mut self, n_bytes: usize) -> Result<Vec<u8>, ParserError> {
        self.require_n_remaining(n_bytes)?;
        let mut buffer = vec![0; n_bytes];
        self.copy_to_slice(&mut buffer);
        Ok(buffer)
    }

    /// Read `n` bytes as text. Non-UTF-8 input is decoded lossily; the
    /// fields read this way (view names) are display-only.
    fn read_n_bytes_to_string(&mut self, n_bytes: usize) -> Result<String, ParserError> {
        let buffer = self.read_n_bytes(n_bytes)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }

    fn read_address(&mut self, afi: &Afi) -> Result<IpAddr, ParserError> {
        match afi {
            Afi::Ipv4 => self.read_ipv4_address().map(IpAddr::V4),
            Afi::Ipv6 => self.read_ipv6_address().map(IpAddr::V6),
        }
    }

    fn read_ipv4_address(&mut self) -> Result<Ipv4Addr, ParserError> {
        Ok(Ipv4Addr::from(self.read_u32()?))
    }

    fn read_ipv6_address(&mut self) -> Result<Ipv6Addr, ParserError> {
        self.require_n_remaining(16)?;
        Ok(Ipv6Addr::from(self.get_u128()))
    }

    /// Read a prefix address truncated to `bit_len` bits: ⌈bit_len/8⌉
    /// bytes, zero-padded on the right to the full address width.
    ///
    /// Bits beyond `bit_len` inside the last consumed byte must be zero;
    /// a prefix like `192.168.0.0/9` with a set bit 10 is rejected.
    fn read_truncated_address(&mut self, afi: &Afi, bit_len: u8) -> Result<IpAddr, ParserError> {
        if bit_len > afi.max_prefix_len() {
            return Err(ParserError::ParseError(format!(
                "Invalid prefix length {bit_len}"
            )));
        }
        let byte_len = (bit_len as usize).div_ceil(8);
        self.require_n_remaining(byte_len)?;

        let addr = match afi {
            Afi::Ipv4 => {
                let mut buff = [0u8; 4];
                self.copy_to_slice(&mut buff[..byte_len]);
                IpAddr::V4(Ipv4Addr::from(buff))
            }
            Afi::Ipv6 => {
                let mut buff = [0u8; 16];
                self.copy_to_slice(&mut buff[..byte_len]);
                IpAddr::V6(Ipv6Addr::from(buff))
            }
        };

        // trailing bits of the last byte beyond the prefix length must be 0
        let extra_bits = byte_len * 8 - bit_len as usize;
        if extra_bits > 0 {
            let last_byte = match addr {
                IpAddr::V4(a) => a.octets()[byte_len - 1],
                IpAddr::V6(a) => a.octets()[byte_len - 1],
            };
            if last_byte & ((1u8 << extra_bits) - 1) != 0 {
                return Err(ParserError::ParseError(format!(
                    "Invalid prefix {addr}/{bit_len}"
                )));
            }
        }
        Ok(addr)
    }

    fn read_asn(&mut self, as_length: AsnLength) -> Result<Asn, ParserError> {
        match as_length {
            AsnLength::Bits16 => Ok(Asn::new_16bit(self.read_u16()?)),
            AsnLength::Bits32 => Ok(Asn::new_32bit(self.read_u32()?)),
        }
    }

    fn read_asns(&mut self, as_length: AsnLength, count: usize) -> Result<Vec<Asn>, ParserError> {
        self.require_n_remaining(count * as_length.byte_len())?;
        let mut asns = Vec::with_capacity(count);
        for _ in 0..count {
            asns.push(self.read_asn(as_length)?);
        }
        Ok(asns)
    }

    fn read_afi(&mut self) -> Result<Afi, ParserError> {
        Ok(Afi::try_from(self.read_u16()?)?)
    }

    fn read_safi(&mut self) -> Result<Safi, ParserError> {
        Ok(Safi::try_from(self.read_u8()?)?)
    }

    fn read_rd(&mut self) -> Result<RouteDistinguisher, ParserError> {
        Ok(RouteDistinguisher::new(self.read_u64()?))
    }

    /// Read one NLRI: optional 4-byte path identifier, 1-byte prefix
    /// length, the L3VPN label stack and route distinguisher when the SAFI
    /// calls for them, then the truncated prefix address.
    fn read_nlri_prefix(
        &mut self,
        afi: &Afi,
        safi: &Safi,
        add_path: bool,
    ) -> Result<NetworkPrefix, ParserError> {
        let path_id = match add_path {
            true => Some(self.read_u32()?),
            false => None,
        };

        // Length in bits; for L3VPN it also covers the label stack and RD
        let bit_len = self.read_u8()?;
        let mut addr_bits = bit_len;

        let mut vpn = None;
        if safi.is_l3vpn() {
            let mut labels: SmallVec<[u32; 4]> = SmallVec::new();
            loop {
                let label = self.read_u24()?;
                labels.push(label);
                if label & MplsLabelStack::BOTTOM_OF_STACK != 0
                    || label == MplsLabelStack::WITHDRAWN
                {
                    break;
                }
            }
            let stack = MplsLabelStack { labels };
            let rd = self.read_rd()?;
            let overhead = stack.nlri_overhead_bits();
            if (addr_bits as usize) < overhead {
                return Err(ParserError::ParseError(format!(
                    "Invalid prefix length {bit_len}"
                )));
            }
            addr_bits -= overhead as u8;
            vpn = Some((stack, rd));
        }

        let addr = self.read_truncated_address(afi, addr_bits)?;
        let prefix = IpNet::new(addr, addr_bits).map_err(|_| {
            ParserError::ParseError(format!("Invalid prefix length {addr_bits}"))
        })?;

        let mut nlri = NetworkPrefix::new(prefix, path_id);
        if let Some((labels, rd)) = vpn {
            nlri = nlri.with_vpn(labels, rd);
        }
        Ok(nlri)
    }
}

// All types that implement Buf can now read prefixes
impl<T: Buf> ReadUtils for T {}

fn parse_nlri_region(
    mut data: Bytes,
    afi: &Afi,
    safi: &Safi,
    add_path: bool,
) -> Result<Vec<NetworkPrefix>, ParserError> {
    let mut prefixes = vec![];
    while data.remaining() > 0 {
        prefixes.push(data.read_nlri_prefix(afi, safi, add_path)?);
    }
    Ok(prefixes)
}

/// Parse a region holding a list of NLRI.
///
/// ADD-PATH presence is not always inferable from the enclosing subtype:
/// collectors have written path-identifier NLRI into non-ADDPATH records.
/// When `add_path` is false the region is first parsed as plain prefixes;
/// if that fails anywhere before the region ends, or produces two
/// bit-identical prefixes, the whole region is re-parsed with path
/// identifiers. This replay is the grammar's only backtracking.
pub fn parse_nlri_list(
    data: Bytes,
    afi: &Afi,
    safi: &Safi,
    add_path: bool,
) -> Result<Vec<NetworkPrefix>, ParserError> {
    if add_path {
        return parse_nlri_region(data, afi, safi, true);
    }

    match parse_nlri_region(data.clone(), afi, safi, false) {
        Ok(prefixes) => {
            if prefixes.iter().all_unique() {
                return Ok(prefixes);
            }
            debug!("duplicate prefix in NLRI list, re-parsing as add-path");
        }
        Err(e) => {
            debug!("NLRI list parsing failed ({e}), re-parsing as add-path");
        }
    }
    parse_nlri_region(data, afi, safi, true)
}
