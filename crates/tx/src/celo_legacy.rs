//! The pre-Cel2 Celo legacy transaction.

use alloy_primitives::{Address, B256, Bytes, ChainId, Signature, TxKind, U256, keccak256};
use alloy_rlp::{BufMut, EMPTY_STRING_CODE, Encodable, Header};

/// A Celo legacy transaction.
///
/// Identical to an Ethereum legacy transaction except for three additional
/// fields placed between `gas_limit` and `to`:
///
/// - `fee_currency`: whitelisted token the gas fee is paid in
/// - `gateway_fee_recipient`: full node compensated for relaying the
///   transaction to light clients
/// - `gateway_fee`: flat payment to that node
///
/// Wire format:
/// `rlp([nonce, gasPrice, gasLimit, feeCurrency, gatewayFeeRecipient,
/// gatewayFee, to, value, data, v, r, s])`, with EIP-155 replay protection
/// applied when a chain id is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CeloTxLegacy {
    /// EIP-155 chain id. `None` signs without replay protection.
    pub chain_id: Option<ChainId>,
    /// Sender nonce.
    pub nonce: u64,
    /// Gas price, denominated in the fee currency when one is set.
    pub gas_price: u128,
    /// Gas limit. Surplus gas is returned to the sender.
    pub gas_limit: u64,
    /// Address of the whitelisted currency used to pay for gas.
    ///
    /// `None` pays in the native currency (CELO).
    pub fee_currency: Option<Address>,
    /// Recipient of the gateway fee.
    pub gateway_fee_recipient: Option<Address>,
    /// Flat fee paid to the full node that relays the transaction.
    pub gateway_fee: U256,
    /// Recipient, or [`TxKind::Create`] for deployments.
    pub to: TxKind,
    /// Value transferred, in wei.
    pub value: U256,
    /// Calldata for contract execution.
    pub input: Bytes,
}

impl CeloTxLegacy {
    fn fields_length(&self) -> usize {
        self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + opt_address_length(&self.fee_currency)
            + opt_address_length(&self.gateway_fee_recipient)
            + self.gateway_fee.length()
            + self.to.length()
            + self.value.length()
            + self.input.length()
    }

    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        encode_opt_address(&self.fee_currency, out);
        encode_opt_address(&self.gateway_fee_recipient, out);
        self.gateway_fee.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
    }

    /// Encodes the signing payload. With a chain id the EIP-155 suffix
    /// `[chainId, 0, 0]` is appended to the field list.
    pub fn encode_for_signing(&self, out: &mut dyn BufMut) {
        let mut payload_length = self.fields_length();
        if let Some(id) = self.chain_id {
            payload_length += id.length() + 2;
        }
        Header { list: true, payload_length }.encode(out);
        self.encode_fields(out);
        if let Some(id) = self.chain_id {
            id.encode(out);
            0u8.encode(out);
            0u8.encode(out);
        }
    }

    /// Hash committed to by the sender's signature.
    pub fn signature_hash(&self) -> B256 {
        let mut buf = Vec::with_capacity(self.fields_length() + 16);
        self.encode_for_signing(&mut buf);
        keccak256(&buf)
    }

    /// The `v` value carried on the wire for `signature`, with EIP-155
    /// replay protection applied when a chain id is set.
    pub fn eip155_v(&self, signature: &Signature) -> u64 {
        let parity = signature.v() as u64;
        match self.chain_id {
            Some(id) => parity + 35 + 2 * id,
            None => parity + 27,
        }
    }

    fn encode_signed(&self, signature: &Signature, out: &mut dyn BufMut) {
        let v = self.eip155_v(signature);
        let payload_length = self.fields_length()
            + v.length()
            + signature.r().length()
            + signature.s().length();
        Header { list: true, payload_length }.encode(out);
        self.encode_fields(out);
        v.encode(out);
        signature.r().encode(out);
        signature.s().encode(out);
    }

    /// Attaches `signature`, producing the network-ready envelope.
    pub fn into_signed(self, signature: Signature) -> SignedCeloLegacy {
        let mut buf = Vec::with_capacity(self.fields_length() + 80);
        self.encode_signed(&signature, &mut buf);
        let hash = keccak256(&buf);
        SignedCeloLegacy { tx: self, signature, hash, raw: buf.into() }
    }
}

/// A signed [`CeloTxLegacy`], carrying the raw RLP bytes accepted by
/// `eth_sendRawTransaction`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedCeloLegacy {
    tx: CeloTxLegacy,
    signature: Signature,
    hash: B256,
    raw: Bytes,
}

impl SignedCeloLegacy {
    /// The transaction that was signed, fields unmodified.
    pub const fn tx(&self) -> &CeloTxLegacy {
        &self.tx
    }

    /// The attached signature.
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The transaction hash the network will report for this envelope.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Raw RLP bytes ready for submission.
    pub const fn raw(&self) -> &Bytes {
        &self.raw
    }
}

fn opt_address_length(address: &Option<Address>) -> usize {
    address.as_ref().map_or(1, Encodable::length)
}

fn encode_opt_address(address: &Option<Address>, out: &mut dyn BufMut) {
    match address {
        Some(address) => address.encode(out),
        // Absent optionals go on the wire as the empty string.
        None => out.put_u8(EMPTY_STRING_CODE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_consensus::{SignableTransaction, TxLegacy};
    use alloy_primitives::{address, bytes};

    const ALFAJORES: ChainId = 44787;

    fn demo_tx() -> CeloTxLegacy {
        CeloTxLegacy {
            chain_id: Some(ALFAJORES),
            nonce: 1,
            gas_price: 5_000_000_000,
            gas_limit: 200_000,
            fee_currency: Some(address!("0x874069Fa1Eb16D44d622F2e0Ca25eeA172369bC1")),
            gateway_fee_recipient: Some(Address::ZERO),
            gateway_fee: U256::from(1u64),
            to: TxKind::Call(address!("0x9a8e698171364db8e0F5Fe30f658F233F1347F6a")),
            value: U256::from(10u64),
            input: bytes!("abc1"),
        }
    }

    #[test]
    fn signing_payload_carries_fee_currency() {
        let tx = demo_tx();
        let fee_currency = tx.fee_currency.unwrap();

        let mut buf = Vec::new();
        tx.encode_for_signing(&mut buf);
        assert!(buf.windows(20).any(|w| w == fee_currency.as_slice()));
    }

    #[test]
    fn absent_fee_currency_encodes_as_empty_string() {
        let fee_currency = demo_tx().fee_currency.unwrap();

        let mut tx = demo_tx();
        tx.fee_currency = None;
        tx.gateway_fee_recipient = None;

        let mut buf = Vec::new();
        tx.encode_for_signing(&mut buf);
        assert!(!buf.windows(20).any(|w| w == fee_currency.as_slice()));
        assert_ne!(tx.signature_hash(), demo_tx().signature_hash());
    }

    /// Strips the outer list header from an encoded signing payload.
    fn list_payload(buf: &[u8]) -> &[u8] {
        let mut slice = buf;
        let header = Header::decode(&mut slice).unwrap();
        assert!(header.list);
        &slice[..header.payload_length]
    }

    #[test]
    fn cleared_fee_fields_leave_only_the_arity_difference() {
        let mut tx = demo_tx();
        tx.fee_currency = None;
        tx.gateway_fee_recipient = None;
        tx.gateway_fee = U256::ZERO;

        let eth = TxLegacy {
            chain_id: tx.chain_id,
            nonce: tx.nonce,
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            to: tx.to,
            value: tx.value,
            input: tx.input.clone(),
        };

        let mut celo_buf = Vec::new();
        tx.encode_for_signing(&mut celo_buf);
        let mut eth_buf = Vec::new();
        eth.encode_for_signing(&mut eth_buf);

        let celo = list_payload(&celo_buf);
        let ethereum = list_payload(&eth_buf);

        // nonce, gasPrice and gasLimit encode identically up front
        let prefix = tx.nonce.length() + tx.gas_price.length() + tx.gas_limit.length();
        assert_eq!(celo[..prefix], ethereum[..prefix]);

        // then three empty items stand in for the cleared fee fields
        assert_eq!(celo[prefix..prefix + 3], [EMPTY_STRING_CODE; 3]);

        // and the remainder (to, value, data, EIP-155 suffix) is shared
        assert_eq!(celo[prefix + 3..], ethereum[prefix..]);
        assert_ne!(tx.signature_hash(), eth.signature_hash());
    }

    #[test]
    fn fee_fields_change_the_signature_hash() {
        let tx = demo_tx();

        let mut other = tx.clone();
        other.fee_currency = Some(address!("0xF194afDf50B03e69Bd7D057c1Aa9e10c9954E4C9"));
        assert_ne!(tx.signature_hash(), other.signature_hash());

        let mut other = tx.clone();
        other.gateway_fee = U256::from(2u64);
        assert_ne!(tx.signature_hash(), other.signature_hash());
    }

    #[test]
    fn chain_id_changes_the_signature_hash() {
        let tx = demo_tx();
        let mut unprotected = tx.clone();
        unprotected.chain_id = None;
        assert_ne!(tx.signature_hash(), unprotected.signature_hash());
    }

    #[test]
    fn eip155_v_applies_replay_protection() {
        let tx = demo_tx();
        let even = Signature::new(U256::from(1u64), U256::from(1u64), false);
        let odd = Signature::new(U256::from(1u64), U256::from(1u64), true);
        assert_eq!(tx.eip155_v(&even), 2 * ALFAJORES + 35);
        assert_eq!(tx.eip155_v(&odd), 2 * ALFAJORES + 36);

        let mut unprotected = tx;
        unprotected.chain_id = None;
        assert_eq!(unprotected.eip155_v(&even), 27);
        assert_eq!(unprotected.eip155_v(&odd), 28);
    }

    #[test]
    fn signed_encoding_appends_signature() {
        let tx = demo_tx();
        let signature = Signature::new(U256::from(7u64), U256::from(9u64), false);
        let signed = tx.clone().into_signed(signature);

        assert_eq!(signed.tx(), &tx);
        assert_eq!(signed.hash(), keccak256(signed.raw()));

        // v, r and s are the last three list items.
        let raw = signed.raw();
        assert_eq!(raw[raw.len() - 1], 9);
        assert_eq!(raw[raw.len() - 2], 7);
    }
}
