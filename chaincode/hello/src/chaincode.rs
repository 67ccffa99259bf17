// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

chaincode_shim::chaincode!(hello::HelloChaincode);
